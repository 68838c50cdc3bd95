use crate::runtime::{RuntimeError, hash::identity_hash, mismatch};
use membergen_schema::node::{BuilderDescriptor, ClassId};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

fn next_id() -> u32 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

///
/// Value
///
/// Primitives compare by value, arrays and objects by reference.
///

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Text(String),
    Array(ArrayRef),
    Object(ObjectRef),
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Fresh object with the given fields; absent fields read as unset.
    pub fn object<K: Into<String>>(
        class: impl Into<ClassId>,
        fields: impl IntoIterator<Item = (K, Self)>,
    ) -> Self {
        Self::Object(ObjectRef::new(class.into(), fields))
    }

    pub fn array(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Array(ArrayRef::new(items.into_iter().collect()))
    }

    /// Builder instance with every slot empty and every flag cleared.
    #[must_use]
    pub fn builder(desc: &BuilderDescriptor) -> Self {
        let mut fields = Vec::new();
        for slot in &desc.slots {
            fields.push((slot.value_slot.clone(), Self::Null));
            if let Some(flag) = &slot.was_set_slot {
                fields.push((flag.clone(), Self::Bool(false)));
            }
        }

        Self::object(desc.builder.clone(), fields)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Text(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    pub fn to_bool(&self) -> Result<bool, RuntimeError> {
        self.as_bool().ok_or_else(|| mismatch("boolean", self))
    }

    pub fn to_int(&self) -> Result<i32, RuntimeError> {
        self.as_int().ok_or_else(|| mismatch("int", self))
    }

    /// Object behind a receiver; `name` is the member being accessed.
    pub fn receiver(&self, name: &str) -> Result<&ObjectRef, RuntimeError> {
        match self {
            Self::Object(obj) => Ok(obj),
            Self::Null => Err(RuntimeError::NullReceiver {
                name: name.to_string(),
            }),
            other => Err(mismatch("object", other)),
        }
    }

    /// Property read that raises while the property is uninitialized.
    pub fn field(&self, name: &str) -> Result<Self, RuntimeError> {
        let obj = self.receiver(name)?;

        obj.get(name).ok_or_else(|| RuntimeError::Uninitialized {
            class: obj.class().clone(),
            property: name.to_string(),
        })
    }

    /// Property read; `None` while the property is uninitialized.
    pub fn try_field(&self, name: &str) -> Result<Option<Self>, RuntimeError> {
        Ok(self.receiver(name)?.get(name))
    }

    pub fn set_field(&self, name: &str, value: Self) -> Result<(), RuntimeError> {
        self.receiver(name)?.set(name, value);

        Ok(())
    }

    /// Reference equality; primitives fall back to value equality.
    #[must_use]
    pub fn same_ref(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => a.same(b),
            (Self::Object(a), Self::Object(b)) => a.same(b),
            (Self::Array(_) | Self::Object(_), _) | (_, Self::Array(_) | Self::Object(_)) => false,
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a.same(b),
            (Self::Object(a), Self::Object(b)) => a.same(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}L"),
            Self::Text(t) => write!(f, "{t:?}"),
            Self::Array(a) => write!(f, "{a:?}"),
            Self::Object(o) => write!(f, "{o:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Self::Long(l)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

///
/// ArrayRef
///

#[derive(Clone)]
pub struct ArrayRef(Rc<ArrayData>);

struct ArrayData {
    id: u32,
    items: RefCell<Vec<Value>>,
}

impl ArrayRef {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(ArrayData {
            id: next_id(),
            items: RefCell::new(items),
        }))
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.0.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.items.borrow().get(index).cloned()
    }

    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn identity_hash(&self) -> i32 {
        identity_hash(self.id())
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array@{:x}", self.identity_hash())
    }
}

///
/// ObjectRef
///
/// Shared handle to an instance. Unset deferred-init fields are simply
/// absent from the field map.
///

#[derive(Clone)]
pub struct ObjectRef(Rc<ObjectData>);

struct ObjectData {
    id: u32,
    class: ClassId,
    fields: RefCell<BTreeMap<String, Value>>,
}

impl ObjectRef {
    pub fn new<K: Into<String>>(
        class: ClassId,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();

        Self(Rc::new(ObjectData {
            id: next_id(),
            class,
            fields: RefCell::new(fields),
        }))
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.0.id
    }

    #[must_use]
    pub fn class(&self) -> &ClassId {
        &self.0.class
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.fields.borrow().get(name).cloned()
    }

    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.0.fields.borrow_mut().insert(name.into(), value);
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.0.fields.borrow().contains_key(name)
    }

    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn identity_hash(&self) -> i32 {
        identity_hash(self.id())
    }

    /// Root-object representation, `ShortName@hash`.
    #[must_use]
    pub fn identity_repr(&self) -> String {
        format!("{}@{:x}", self.class().short_name(), self.identity_hash())
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity_repr())
    }
}
