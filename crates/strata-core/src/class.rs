//! Runtime class descriptors.
//!
//! Every node and view type declares a `static` [`Class`] naming itself and,
//! optionally, the class it derives from. The descriptors give the framework a
//! stable type tag for factory lookups and an ancestry test that does not depend
//! on [`std::any::TypeId`] being exposed to callers.
//!
//! # Example
//!
//! ```
//! use strata_core::class::{Class, Identifiable};
//! use strata_core::node::BASE_NODE;
//!
//! static FOLDER_NODE: Class = Class::derived("FolderNode", &BASE_NODE);
//!
//! struct FolderNode;
//!
//! impl Identifiable for FolderNode {
//!     fn class(&self) -> &'static Class {
//!         &FOLDER_NODE
//!     }
//! }
//!
//! let folder = FolderNode;
//! assert_eq!(folder.class_name(), "FolderNode");
//! assert!(folder.is_a(&BASE_NODE));
//! assert!(FOLDER_NODE.is_subclass_of(&BASE_NODE));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

/// A static type descriptor.
///
/// Two descriptors are equal when their names are equal, so class names must be
/// unique within an application.
pub struct Class {
    name: &'static str,
    base: Option<&'static Class>,
}

impl Class {
    /// Create a descriptor with no base class.
    pub const fn root(name: &'static str) -> Self {
        Self { name, base: None }
    }

    /// Create a descriptor deriving from `base`.
    pub const fn derived(name: &'static str, base: &'static Class) -> Self {
        Self {
            name,
            base: Some(base),
        }
    }

    /// The class name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The immediate base class, if any.
    pub fn base(&self) -> Option<&'static Class> {
        self.base
    }

    /// Whether this class is `other` or derives from it.
    pub fn is_a(&self, other: &Class) -> bool {
        self == other || self.is_subclass_of(other)
    }

    /// Whether this class strictly derives from `other`.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = self.base;
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.base;
        }
        false
    }

    /// Iterate from this class up to its root class.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Class> {
        std::iter::successors(Some(self), |class| class.base)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            Some(base) => write!(f, "Class({} : {})", self.name, base.name),
            None => write!(f, "Class({})", self.name),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Runtime classification shared by nodes and views.
pub trait Identifiable {
    /// The static descriptor of the concrete type.
    fn class(&self) -> &'static Class;

    /// Shorthand for `self.class().name()`.
    fn class_name(&self) -> &'static str {
        self.class().name()
    }

    /// Whether the concrete type is `class` or derives from it.
    fn is_a(&self, class: &Class) -> bool {
        self.class().is_a(class)
    }
}
