// SPDX-License-Identifier: MIT OR Apache-2.0
//! The tween engine.
//!
//! [`Tweener`] owns every running interpolation task. The host creates tasks
//! through it and calls [`Tweener::tick`] once per frame; each active task
//! then writes one shaped sample through its accessor. The handle is cheap to
//! clone, so accessors may hold one and cancel, pause or start tasks while a
//! tick is in progress.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::accessor::{Accessor, PropertyAccessor, PropertyTarget};
use crate::config::TweenerConfig;
use crate::curve::Curve;
use crate::error::{Result, TweenError};
use crate::library::CurveLibrary;
use crate::request::TweenRequest;
use crate::task::{derive_duration, ErasedTask, InterpolationTask, Step, TweenId};
use crate::value::{Color, Quat, Tweenable, ValueKind, Vec2, Vec3};

type TaskCell = Rc<RefCell<dyn ErasedTask>>;

struct Registry {
    /// Live tasks in registration order
    tasks: IndexMap<TweenId, TaskCell>,
    /// Subset of `tasks` that is suspended
    paused: HashSet<TweenId>,
    /// `None` once the last ID has been handed out
    next_id: Option<u64>,
    library: CurveLibrary,
    snap_on_create: bool,
    ticking: bool,
}

impl Registry {
    fn allocate_id(&mut self) -> Result<TweenId> {
        let raw = self.next_id.ok_or(TweenError::IdsExhausted)?;
        self.next_id = raw.checked_add(1);
        Ok(TweenId::from_raw(raw))
    }

    fn is_runnable(&self, id: TweenId) -> bool {
        self.tasks.contains_key(&id) && !self.paused.contains(&id)
    }
}

/// Clears the ticking flag even if an accessor panics mid-pass
struct TickGuard<'a>(&'a RefCell<Registry>);

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.0.try_borrow_mut() {
            registry.ticking = false;
        }
    }
}

/// Handle to a tween engine
#[derive(Clone)]
pub struct Tweener {
    inner: Rc<RefCell<Registry>>,
}

impl Default for Tweener {
    fn default() -> Self {
        Self::new()
    }
}

impl Tweener {
    /// Create an engine with default settings
    pub fn new() -> Self {
        Self::with_config(TweenerConfig::default())
    }

    /// Create an engine from a config, registering its named curves
    pub fn with_config(config: TweenerConfig) -> Self {
        let mut library = CurveLibrary::new();
        for (name, curve) in config.curves {
            library.register(name, curve);
        }

        Self {
            inner: Rc::new(RefCell::new(Registry {
                tasks: IndexMap::new(),
                paused: HashSet::new(),
                next_id: Some(config.first_id),
                library,
                snap_on_create: config.snap_on_create,
                ticking: false,
            })),
        }
    }

    /// Register (or replace) a named curve for later requests
    pub fn register_curve(&self, name: impl Into<String>, curve: impl Into<Rc<Curve>>) {
        self.inner.borrow_mut().library.register(name, curve);
    }

    /// Remove a named curve. Tasks already using it keep their copy.
    pub fn unregister_curve(&self, name: &str) -> bool {
        self.inner.borrow_mut().library.unregister(name).is_some()
    }

    /// Start an interpolation driven through an explicit accessor.
    ///
    /// Validation happens before anything is registered: on error no ID is
    /// consumed and no task exists.
    pub fn begin<V, A>(&self, accessor: A, request: TweenRequest<V>) -> Result<TweenId>
    where
        V: Tweenable,
        A: Accessor<V> + 'static,
    {
        let TweenRequest {
            start,
            goal,
            rate,
            curve,
            mode,
        } = request;

        let start = match start {
            Some(start) => start,
            None => accessor.get(),
        };
        let duration = derive_duration(mode, rate, &start, &goal)?;

        let (id, curve, snap) = {
            let mut registry = self.inner.borrow_mut();
            let curve = registry.library.resolve(curve.as_ref())?;
            (registry.allocate_id()?, curve, registry.snap_on_create)
        };

        let mut task = InterpolationTask::new(id, accessor, start, goal, duration, curve);
        if snap {
            task.write_current();
        }

        tracing::debug!(
            "Tween {} created: {} over {:.3}s ({:?} mode, rate {})",
            id,
            V::KIND,
            duration,
            mode,
            rate
        );

        let cell: TaskCell = Rc::new(RefCell::new(task));
        self.inner.borrow_mut().tasks.insert(id, cell);
        Ok(id)
    }

    /// Start an interpolation of a named property on `target`.
    ///
    /// Fails with [`TweenError::PropertyNotFound`] or
    /// [`TweenError::TypeMismatch`] before any task is created.
    pub fn begin_interpolate<V, T>(
        &self,
        target: &Rc<RefCell<T>>,
        property: &str,
        request: TweenRequest<V>,
    ) -> Result<TweenId>
    where
        V: Tweenable,
        T: PropertyTarget + ?Sized + 'static,
    {
        let accessor = PropertyAccessor::<T, V>::resolve(target, property)?;
        self.begin(accessor, request)
    }

    /// Interpolate a scalar property
    pub fn interpolate_float<T>(
        &self,
        target: &Rc<RefCell<T>>,
        property: &str,
        request: TweenRequest<f32>,
    ) -> Result<TweenId>
    where
        T: PropertyTarget + ?Sized + 'static,
    {
        self.begin_interpolate(target, property, request)
    }

    /// Interpolate a 2D vector property
    pub fn interpolate_vec2<T>(
        &self,
        target: &Rc<RefCell<T>>,
        property: &str,
        request: TweenRequest<Vec2>,
    ) -> Result<TweenId>
    where
        T: PropertyTarget + ?Sized + 'static,
    {
        self.begin_interpolate(target, property, request)
    }

    /// Interpolate a 3D vector property
    pub fn interpolate_vec3<T>(
        &self,
        target: &Rc<RefCell<T>>,
        property: &str,
        request: TweenRequest<Vec3>,
    ) -> Result<TweenId>
    where
        T: PropertyTarget + ?Sized + 'static,
    {
        self.begin_interpolate(target, property, request)
    }

    /// Interpolate a rotation property. Blends Euler angles, so large
    /// rotations may not take the shortest path.
    pub fn interpolate_rotation<T>(
        &self,
        target: &Rc<RefCell<T>>,
        property: &str,
        request: TweenRequest<Quat>,
    ) -> Result<TweenId>
    where
        T: PropertyTarget + ?Sized + 'static,
    {
        self.begin_interpolate(target, property, request)
    }

    /// Interpolate a color property
    pub fn interpolate_color<T>(
        &self,
        target: &Rc<RefCell<T>>,
        property: &str,
        request: TweenRequest<Color>,
    ) -> Result<TweenId>
    where
        T: PropertyTarget + ?Sized + 'static,
    {
        self.begin_interpolate(target, property, request)
    }

    /// Whether a task with this ID is registered (active or paused)
    pub fn exists(&self, id: TweenId) -> bool {
        self.inner.borrow().tasks.contains_key(&id)
    }

    /// Whether the task is paused. False for unknown IDs.
    pub fn is_paused(&self, id: TweenId) -> bool {
        self.inner.borrow().paused.contains(&id)
    }

    /// Suspend a task. Paused tasks ignore ticks.
    pub fn pause(&self, id: TweenId) -> Result<()> {
        let mut registry = self.inner.borrow_mut();
        if !registry.tasks.contains_key(&id) {
            return Err(TweenError::UnknownId(id));
        }
        if !registry.paused.insert(id) {
            tracing::warn!("Tween {} is already paused", id);
            return Err(TweenError::AlreadyPaused(id));
        }
        tracing::debug!("Tween {} paused", id);
        Ok(())
    }

    /// Resume a paused task from where it stopped
    pub fn resume(&self, id: TweenId) -> Result<()> {
        if self.inner.borrow_mut().paused.remove(&id) {
            tracing::debug!("Tween {} resumed", id);
            Ok(())
        } else {
            Err(TweenError::UnknownId(id))
        }
    }

    /// Remove a task immediately, without a final write
    pub fn cancel(&self, id: TweenId) -> Result<()> {
        let removed = {
            let mut registry = self.inner.borrow_mut();
            registry.paused.remove(&id);
            registry.tasks.shift_remove(&id)
        };
        match removed {
            Some(_) => {
                tracing::debug!("Tween {} cancelled", id);
                Ok(())
            }
            None => Err(TweenError::UnknownId(id)),
        }
    }

    /// Cancel every task, returning how many were removed
    pub fn cancel_all(&self) -> usize {
        let removed = {
            let mut registry = self.inner.borrow_mut();
            registry.paused.clear();
            std::mem::take(&mut registry.tasks)
        };
        if !removed.is_empty() {
            tracing::debug!("Cancelled {} tweens", removed.len());
        }
        removed.len()
    }

    /// Normalized progress of a task in `[0, 1]`.
    ///
    /// `None` for unknown IDs, and for a task queried from inside its own
    /// accessor while it is being advanced.
    pub fn progress(&self, id: TweenId) -> Option<f32> {
        let task = self.inner.borrow().tasks.get(&id).map(Rc::clone)?;
        let progress = task.try_borrow().ok().map(|task| task.progress());
        progress
    }

    /// Value kind a task drives
    pub fn kind(&self, id: TweenId) -> Option<ValueKind> {
        let task = self.inner.borrow().tasks.get(&id).map(Rc::clone)?;
        let kind = task.try_borrow().ok().map(|task| task.kind());
        kind
    }

    /// Duration of a task in seconds, as derived from its request
    pub fn duration(&self, id: TweenId) -> Option<f32> {
        let task = self.inner.borrow().tasks.get(&id).map(Rc::clone)?;
        let duration = task.try_borrow().ok().map(|task| task.duration());
        duration
    }

    /// Names of the registered user curves, in registration order
    pub fn curve_names(&self) -> Vec<String> {
        self.inner
            .borrow()
            .library
            .names()
            .map(str::to_string)
            .collect()
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Whether no tasks are registered
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().tasks.is_empty()
    }

    /// Number of tasks that will advance on the next tick
    pub fn active_count(&self) -> usize {
        let registry = self.inner.borrow();
        registry.tasks.len() - registry.paused.len()
    }

    /// Number of paused tasks
    pub fn paused_count(&self) -> usize {
        self.inner.borrow().paused.len()
    }

    /// Advance every active task by `dt` seconds, in registration order.
    ///
    /// Accessors run while no engine borrow is held. A task cancelled or
    /// paused by an earlier accessor in the same pass is skipped, and tasks
    /// created during the pass first advance on the next tick. Nested calls
    /// from inside an accessor are ignored.
    pub fn tick(&self, dt: f32) {
        let batch: Vec<(TweenId, TaskCell)> = {
            let mut guard = self.inner.borrow_mut();
            let registry = &mut *guard;
            if registry.ticking {
                tracing::warn!("Nested tick ignored");
                return;
            }
            registry.ticking = true;
            registry
                .tasks
                .iter()
                .filter(|(id, _)| !registry.paused.contains(*id))
                .map(|(id, task)| (*id, Rc::clone(task)))
                .collect()
        };
        let _guard = TickGuard(&self.inner);

        let mut advanced = 0usize;
        let mut completed = 0usize;
        for (id, task) in &batch {
            if !self.inner.borrow().is_runnable(*id) {
                continue;
            }

            let step = match task.try_borrow_mut() {
                Ok(mut task) => task.advance(dt),
                Err(_) => continue,
            };
            advanced += 1;

            if step == Step::Completed {
                let mut registry = self.inner.borrow_mut();
                if registry.tasks.shift_remove(id).is_some() {
                    registry.paused.remove(id);
                    completed += 1;
                    tracing::debug!("Tween {} completed", id);
                }
            }
        }

        tracing::trace!(
            "Tick {:.4}s: advanced {}, completed {}",
            dt,
            advanced,
            completed
        );
    }
}

impl fmt::Debug for Tweener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(registry) => f
                .debug_struct("Tweener")
                .field("tasks", &registry.tasks.len())
                .field("paused", &registry.paused.len())
                .field("next_id", &registry.next_id)
                .finish(),
            Err(_) => f.write_str("Tweener { <busy> }"),
        }
    }
}
