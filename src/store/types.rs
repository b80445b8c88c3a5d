use crate::contract::InterfaceError;
use crate::markers;
use super::registry::Registry;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract flags carried by a member. Set once by the marker functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Markers {
    pub required: bool,
    pub required_classmethod: bool,
    #[serde(rename = "final")]
    pub final_: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MemberKind {
    /// Bound to an instance of the receiving class.
    Instance,
    /// Bound to the receiving class itself.
    ClassMethod,
    Static,
    /// A plain, non-callable value.
    Attribute(Value),
}

impl MemberKind {
    pub fn is_callable(&self) -> bool {
        !matches!(self, MemberKind::Attribute(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemberKind::Instance => "method",
            MemberKind::ClassMethod => "classmethod",
            MemberKind::Static => "staticmethod",
            MemberKind::Attribute(_) => "attribute",
        }
    }
}

/// Parameter shape of a callable member, excluding the receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<String>,
    pub varargs: bool,
    pub varkw: bool,
}

impl Signature {
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { params: params.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn with_varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn with_varkw(mut self) -> Self {
        self.varkw = true;
        self
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.params.clone();
        if self.varargs { parts.push("*args".into()); }
        if self.varkw { parts.push("**kwargs".into()); }
        write!(f, "({})", parts.join(", "))
    }
}

pub type Callable =
    Arc<dyn Fn(&CallContext<'_>, &[Value]) -> Result<Value, InterfaceError> + Send + Sync>;

/// What runs when a member is invoked.
#[derive(Clone)]
pub enum Body {
    /// Placeholder left by `require`: never a real implementation.
    Sentinel,
    Concrete(Callable),
}

impl Body {
    /// A body that does nothing and returns `null`.
    pub fn noop() -> Self {
        Body::Concrete(Arc::new(noop_body))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn noop_body(_: &CallContext<'_>, _: &[Value]) -> Result<Value, InterfaceError> {
    Ok(Value::Null)
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Sentinel => f.write_str("Sentinel"),
            Body::Concrete(_) => f.write_str("Concrete(..)"),
        }
    }
}

/// A member declared directly on a type: method, classmethod, staticmethod or attribute.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub doc: Option<String>,
    pub kind: MemberKind,
    pub markers: Markers,
    pub body: Body,
    pub signature: Option<Signature>,
}

impl Member {
    fn with_kind(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            doc: None,
            kind,
            markers: Markers::default(),
            body: Body::noop(),
            signature: None,
        }
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::with_kind(name, MemberKind::Instance)
    }

    pub fn classmethod(name: impl Into<String>) -> Self {
        Self::with_kind(name, MemberKind::ClassMethod)
    }

    pub fn staticmethod(name: impl Into<String>) -> Self {
        Self::with_kind(name, MemberKind::Static)
    }

    pub fn attribute(name: impl Into<String>, value: Value) -> Self {
        Self::with_kind(name, MemberKind::Attribute(value))
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn body<F>(mut self, f: F) -> Self
    where
        F: Fn(&CallContext<'_>, &[Value]) -> Result<Value, InterfaceError> + Send + Sync + 'static,
    {
        self.body = Body::Concrete(Arc::new(f));
        self
    }

    pub fn required(self) -> Self { markers::require(self) }
    pub fn required_classmethod(self) -> Self { markers::require_classmethod(self) }
    pub fn final_(self) -> Self { markers::final_method(self) }

    pub fn is_callable(&self) -> bool { self.kind.is_callable() }

    pub fn is_sentinel(&self) -> bool { matches!(self.body, Body::Sentinel) }

    /// An attribute holding a falsy value (`null`, `false`, `0`, `""`, `[]`, `{}`)
    /// counts as not provided.
    pub fn is_falsy_attribute(&self) -> bool {
        match &self.kind {
            MemberKind::Attribute(value) => is_falsy(value),
            _ => false,
        }
    }

    /// Message used when this member is reported as missing.
    pub fn missing_message(&self) -> String {
        self.doc.clone().unwrap_or_else(|| format!("'{}' must be implemented.", self.name))
    }
}

/// Declaration of a new type, handed to `Registry::declare`.
#[derive(Debug, Clone, Default)]
pub struct TypeDecl {
    pub name: String,
    pub doc: Option<String>,
    pub bases: SmallVec<[TypeId; 2]>,
    pub members: Vec<Member>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn base(mut self, base: TypeId) -> Self {
        self.bases.push(base);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

/// Invocation context handed to a member body.
pub struct CallContext<'a> {
    pub registry: &'a Registry,
    /// The class the call was made through.
    pub receiver: TypeId,
    /// The class that declares the running member.
    pub owner: TypeId,
    pub name: &'a str,
}

impl<'a> CallContext<'a> {
    /// Calls another member through the same receiver.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, InterfaceError> {
        self.registry.call(self.receiver, name, args)
    }

    /// Calls the next definition of the running member along the receiver's chain.
    pub fn call_super(&self, args: &[Value]) -> Result<Value, InterfaceError> {
        self.registry.call_after(self.receiver, self.owner, self.name, args)
    }
}
