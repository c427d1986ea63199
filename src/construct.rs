use std::any::{self, Any};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::{Arc, Mutex, MutexGuard};

use seahash::SeaHasher;
use tracing::debug;

use crate::binding::{CallArgs, Signature};
use crate::datatype::KeyValue;
use crate::error::{KeepsakeError, Result};
use crate::settings::{ResolutionPolicy, Settings};

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

/// A kept instance, as shared by every construction site of its key.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

// ------------- Identity policy -------------
/// A type's declared identity policy.
///
/// Types opting into registry-managed construction declare which class
/// group they belong to and which constructor parameter identifies an
/// instance within that group. Two types declaring the same group label
/// share one identity namespace.
pub trait Identified: Any + Send + Sync {
    /// Explicit class group label. Left at `None`, the group defaults to
    /// the type's own name, so every type is its own group.
    const CLASS_GROUP: Option<&'static str> = None;
    /// Name of the constructor parameter whose value distinguishes
    /// instances within the group. Without one, every construction in the
    /// group collapses to a single instance regardless of arguments.
    const IDENTIFIER: Option<&'static str> = None;

    /// The constructor signature that call arguments are bound against.
    fn signature() -> Signature {
        Signature::new()
    }

    fn class_group() -> String {
        match Self::CLASS_GROUP {
            Some(group) => group.to_owned(),
            None => short_type_name::<Self>().to_owned(),
        }
    }
}

pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

// ------------- Instance key -------------
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub struct InstanceKey {
    group: String,
    identity: Option<KeyValue>,
}

impl InstanceKey {
    pub fn class(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            identity: None,
        }
    }
    pub fn identified(group: impl Into<String>, identity: impl Into<KeyValue>) -> Self {
        Self {
            group: group.into(),
            identity: Some(identity.into()),
        }
    }
    pub fn group(&self) -> &str {
        &self.group
    }
    pub fn identity(&self) -> Option<&KeyValue> {
        self.identity.as_ref()
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.identity {
            Some(identity) => write!(f, "{}[{}]", self.group, identity),
            None => write!(f, "{}", self.group),
        }
    }
}

// ------------- Instance keeper -------------
struct KeptInstance {
    instance: SharedInstance,
    type_name: &'static str,
}

pub struct InstanceKeeper {
    kept: HashMap<InstanceKey, KeptInstance, KeyHasher>,
}

impl InstanceKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    /// Return the instance kept under `key`, or run `build` and keep its
    /// result. The builder is deferred: on a hit it is never invoked, and
    /// a builder error leaves the table untouched.
    pub fn keep_with<F>(
        &mut self,
        key: InstanceKey,
        type_name: &'static str,
        build: F,
    ) -> Result<(SharedInstance, bool)>
    where
        F: FnOnce() -> Result<SharedInstance>,
    {
        match self.kept.entry(key) {
            Entry::Occupied(e) => Ok((Arc::clone(&e.get().instance), true)),
            Entry::Vacant(e) => {
                let instance = build()?;
                let kept = e.insert(KeptInstance { instance, type_name });
                Ok((Arc::clone(&kept.instance), false))
            }
        }
    }
    pub fn get(&self, key: &InstanceKey) -> Option<SharedInstance> {
        self.kept.get(key).map(|kept| Arc::clone(&kept.instance))
    }
    pub fn type_name(&self, key: &InstanceKey) -> Option<&'static str> {
        self.kept.get(key).map(|kept| kept.type_name)
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn clear(&mut self) {
        self.kept.clear()
    }
}

// ------------- Registry -------------
/// Explicit owner of the registry table.
///
/// The registry is meant to be created by the composition root and handed
/// to whatever constructs registry-managed types; there is no hidden
/// global. Entries are retained for the registry's lifetime unless the
/// owner calls [`Registry::reset`].
pub struct Registry {
    instance_keeper: Arc<Mutex<InstanceKeeper>>,
    settings: Settings,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            instance_keeper: Arc::new(Mutex::new(InstanceKeeper::new())),
            settings,
        }
    }
    pub fn instance_keeper(&self) -> Arc<Mutex<InstanceKeeper>> {
        Arc::clone(&self.instance_keeper)
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compute the instance key for `T` from the supplied arguments.
    ///
    /// With no declared identifier the key is the group alone. An
    /// unresolvable identifier is an error under the strict policy and
    /// degrades to the group-wide key under the collapse policy.
    pub fn key_for<T: Identified>(&self, args: &CallArgs) -> Result<InstanceKey> {
        let group = T::class_group();
        let Some(identifier) = T::IDENTIFIER else {
            return Ok(InstanceKey::class(group));
        };
        match T::signature().resolve(identifier, args) {
            Ok(identity) => Ok(InstanceKey::identified(group, identity)),
            Err(KeepsakeError::UnresolvedIdentifier { .. })
                if self.settings.resolution == ResolutionPolicy::Collapse =>
            {
                Ok(InstanceKey::class(group))
            }
            Err(e) => Err(e),
        }
    }

    /// Construct through `T`'s declared identity policy.
    ///
    /// On a hit the kept `Arc<T>` is returned and `build` never runs, so
    /// construction side effects cannot repeat. On a miss `build` runs and
    /// its result is kept under the computed key. The second element tells
    /// whether the instance was previously kept.
    ///
    /// A key already held by an instance of another type (possible when
    /// types share a class group) is a [`KeepsakeError::TypeConflict`];
    /// cross-type sharing goes through [`Registry::construct_in_group`].
    pub fn construct<T, F>(&self, args: &CallArgs, build: F) -> Result<(Arc<T>, bool)>
    where
        T: Identified,
        F: FnOnce() -> Result<T>,
    {
        let key = self.key_for::<T>(args)?;
        let (kept, previously_kept) = self.keep_keyed::<T, F>(key.clone(), build)?;
        match kept.downcast::<T>() {
            Ok(instance) => Ok((instance, previously_kept)),
            Err(_) => Err(KeepsakeError::TypeConflict {
                group: key.group().to_owned(),
                requested: short_type_name::<T>(),
                kept: self.lock_keeper()?.type_name(&key).unwrap_or("unknown"),
            }),
        }
    }

    /// Like [`Registry::construct`], but returns the type-erased handle,
    /// so types declaring a shared class group observe one another's
    /// instances: whichever type constructs a key first supplies the
    /// instance every later construction of that key receives.
    pub fn construct_in_group<T, F>(
        &self,
        args: &CallArgs,
        build: F,
    ) -> Result<(SharedInstance, bool)>
    where
        T: Identified,
        F: FnOnce() -> Result<T>,
    {
        let key = self.key_for::<T>(args)?;
        self.keep_keyed::<T, F>(key, build)
    }

    /// Probe for a kept instance without constructing anything.
    pub fn lookup(&self, key: &InstanceKey) -> Result<Option<SharedInstance>> {
        Ok(self.lock_keeper()?.get(key))
    }
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock_keeper()?.len())
    }
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock_keeper()?.is_empty())
    }
    /// Drop every kept instance. Meant for owners that need isolation
    /// between runs; a live registry otherwise retains entries forever.
    pub fn reset(&self) -> Result<()> {
        self.lock_keeper()?.clear();
        Ok(())
    }

    // The keeper lock is held across the whole check-then-insert, so the
    // builder must not construct through the same registry.
    fn keep_keyed<T, F>(&self, key: InstanceKey, build: F) -> Result<(SharedInstance, bool)>
    where
        T: Identified,
        F: FnOnce() -> Result<T>,
    {
        let mut keeper = self.lock_keeper()?;
        let (kept, previously_kept) =
            keeper.keep_with(key.clone(), short_type_name::<T>(), || {
                Ok(Arc::new(build()?) as SharedInstance)
            })?;
        drop(keeper);
        if !previously_kept {
            debug!(key = %key, kind = short_type_name::<T>(), "kept new instance");
        }
        Ok((kept, previously_kept))
    }

    fn lock_keeper(&self) -> Result<MutexGuard<'_, InstanceKeeper>> {
        self.instance_keeper
            .lock()
            .map_err(|e| KeepsakeError::Lock(e.to_string()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
