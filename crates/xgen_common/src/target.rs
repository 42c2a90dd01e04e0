//! Compilation target description: framework, runtime identifier, and
//! whether the target runs on a shared framework.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// An opaque target framework moniker such as `netcoreapp1.0` or `net8.0`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Framework(String);

impl Framework {
    /// Creates a framework moniker from its textual form.
    pub fn new(moniker: impl Into<String>) -> Self {
        Self(moniker.into())
    }

    /// Returns the moniker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Framework({})", self.0)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The target a native-image compilation pass produces code for.
///
/// A target is either *portable* (framework-dependent, compiled against a
/// shared framework directory) or *self-contained*. The two shapes can only
/// be created through [`TargetDescriptor::portable`] and
/// [`TargetDescriptor::self_contained`], so a portable descriptor always
/// carries its shared framework directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    framework: Framework,
    rid: String,
    shared_framework_dir: Option<PathBuf>,
}

impl TargetDescriptor {
    /// Creates a framework-dependent target compiled against `shared_framework_dir`.
    pub fn portable(
        framework: Framework,
        rid: impl Into<String>,
        shared_framework_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            framework,
            rid: rid.into(),
            shared_framework_dir: Some(shared_framework_dir.into()),
        }
    }

    /// Creates a self-contained target that carries its own framework.
    pub fn self_contained(framework: Framework, rid: impl Into<String>) -> Self {
        Self {
            framework,
            rid: rid.into(),
            shared_framework_dir: None,
        }
    }

    /// Returns the target framework moniker.
    pub fn framework(&self) -> &Framework {
        &self.framework
    }

    /// Returns the runtime identifier (e.g. `linux-x64`).
    pub fn rid(&self) -> &str {
        &self.rid
    }

    /// Returns the shared framework directory for portable targets.
    pub fn shared_framework_dir(&self) -> Option<&Path> {
        self.shared_framework_dir.as_deref()
    }

    /// Returns `true` if this target runs on a shared framework.
    pub fn is_portable(&self) -> bool {
        self.shared_framework_dir.is_some()
    }

    /// Returns the architecture segment of the runtime identifier.
    ///
    /// This is the last `-`-delimited token: `linux-x64` yields `x64` and
    /// `win7-x86` yields `x86`. A RID without `-` is returned whole.
    pub fn arch_segment(&self) -> &str {
        self.rid.rsplit('-').next().unwrap_or(&self.rid)
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.framework, self.rid)?;
        if self.is_portable() {
            write!(f, " (portable)")?;
        }
        Ok(())
    }
}
