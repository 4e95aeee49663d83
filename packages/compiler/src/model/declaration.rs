//! Declarations
//!
//! Structural description of a type's surface: its members, their modifiers
//! and signatures. Descriptors are plain values; transformation always builds
//! new ones.

use super::type_ref::TypeRef;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

bitflags! {
    /// Declaration modifiers. Serialized as `"PRIVATE | SUSPEND"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u16 {
        const PRIVATE = 1 << 0;
        const PROTECTED = 1 << 1;
        const INTERNAL = 1 << 2;
        const ABSTRACT = 1 << 3;
        const OPEN = 1 << 4;
        const OVERRIDE = 1 << 5;
        const SUSPEND = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeclarationKind {
    Function,
    Property {
        #[serde(default)]
        mutable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_: TypeRef) -> Self {
        Parameter {
            name: name.into(),
            type_,
        }
    }
}

pub type Parameters = SmallVec<[Parameter; 4]>;

/// Body of a function or property getter. Source bodies are opaque; only
/// whether one exists is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberBody {
    #[default]
    Absent,
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDeclaration {
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default = "TypeRef::unit")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub body: MemberBody,
}

impl MemberDeclaration {
    pub fn function(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
        return_type: TypeRef,
    ) -> Self {
        MemberDeclaration {
            name: name.into(),
            kind: DeclarationKind::Function,
            parameters: parameters.into_iter().collect(),
            return_type,
            modifiers: Modifiers::empty(),
            body: MemberBody::Opaque,
        }
    }

    pub fn property(name: impl Into<String>, type_: TypeRef, mutable: bool) -> Self {
        MemberDeclaration {
            name: name.into(),
            kind: DeclarationKind::Property { mutable },
            parameters: Parameters::new(),
            return_type: type_,
            modifiers: Modifiers::empty(),
            body: MemberBody::Absent,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_body(mut self, body: MemberBody) -> Self {
        self.body = body;
        self
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, DeclarationKind::Function)
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, DeclarationKind::Property { .. })
    }

    pub fn is_mutable(&self) -> bool {
        matches!(self.kind, DeclarationKind::Property { mutable: true })
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.contains(Modifiers::PRIVATE)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Fully qualified name.
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
    /// Abstract class or interface.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        TypeDescriptor {
            name: name.into(),
            supertypes: Vec::new(),
            members: Vec::new(),
            is_abstract: false,
        }
    }

    pub fn with_supertypes(mut self, supertypes: impl IntoIterator<Item = TypeRef>) -> Self {
        self.supertypes.extend(supertypes);
        self
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberDeclaration>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.name.clone())
    }

    pub fn package_name(&self) -> &str {
        super::type_ref::split_qualified(&self.name).0
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn non_private_members(&self) -> impl Iterator<Item = &MemberDeclaration> {
        self.members.iter().filter(|m| !m.is_private())
    }
}

/// Records that `generated` mirrors the signature of the type `original`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupertypeSubstitution {
    pub original: TypeRef,
    pub generated: TypeDescriptor,
}

impl SupertypeSubstitution {
    pub fn new(original: TypeRef, generated: TypeDescriptor) -> Self {
        SupertypeSubstitution {
            original,
            generated,
        }
    }

    pub fn generated_ref(&self) -> TypeRef {
        self.generated.type_ref()
    }
}
