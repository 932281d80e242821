//! Global outside-click observation.
//!
//! Dismissal must trigger on presses anywhere on screen, including over other
//! applications, so the shell listens to the system-wide pointer stream via
//! `rdev::listen` on a dedicated thread. rdev's listener cannot be stopped
//! once started; the thread therefore lives until process exit and handles
//! only control their registration slot, not the thread itself.
//!
//! Two independent slots exist, one per dismissal purpose (main window,
//! settings panel). Installing into an occupied slot replaces the previous
//! registration, which is what keeps at most one subscription live per
//! purpose.

use lunabar_core::geometry::{Point, Rect};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Once};

/// Which transient surface a registration dismisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    MainWindow,
    SettingsPanel,
}

/// Owned subscription token. Uninstalling a stale handle (one whose slot was
/// since replaced) is a no-op.
#[derive(Debug)]
pub struct MonitorHandle {
    purpose: Purpose,
    token: u64,
}

type DismissFn = Box<dyn Fn() + Send + 'static>;

struct Registration {
    token: u64,
    exclusion: Vec<Rect>,
    on_outside: DismissFn,
}

struct Slots {
    main: Option<Registration>,
    settings: Option<Registration>,
    // Last pointer position in the shell's y-up logical screen space (rdev
    // reports logical point coordinates, so exclusion rects must be logical
    // too), tracked from move events because press events carry no
    // coordinates of their own.
    pointer: Point,
}

struct Inner {
    slots: Mutex<Slots>,
    next_token: AtomicU64,
    listener: Once,
}

#[derive(Clone)]
pub struct MonitorRegistry {
    inner: Arc<Inner>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(Slots {
                    main: None,
                    settings: None,
                    pointer: Point { x: 0.0, y: 0.0 },
                }),
                next_token: AtomicU64::new(1),
                listener: Once::new(),
            }),
        }
    }

    /// Register an exclusion region and dismissal callback for `purpose`.
    /// Replaces any live registration for the same purpose.
    pub fn install(
        &self,
        purpose: Purpose,
        exclusion: Vec<Rect>,
        on_outside: DismissFn,
    ) -> MonitorHandle {
        self.ensure_listener();

        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
        let registration = Registration {
            token,
            exclusion,
            on_outside,
        };

        let mut slots = self.inner.slots.lock().unwrap();
        let slot = match purpose {
            Purpose::MainWindow => &mut slots.main,
            Purpose::SettingsPanel => &mut slots.settings,
        };
        if slot.is_some() {
            tracing::debug!(?purpose, "replacing live outside-click registration");
        }
        *slot = Some(registration);

        MonitorHandle { purpose, token }
    }

    /// Cancel a registration. Safe on stale handles.
    pub fn uninstall(&self, handle: MonitorHandle) {
        let mut slots = self.inner.slots.lock().unwrap();
        let slot = match handle.purpose {
            Purpose::MainWindow => &mut slots.main,
            Purpose::SettingsPanel => &mut slots.settings,
        };
        match slot {
            Some(registration) if registration.token == handle.token => *slot = None,
            _ => tracing::debug!(?handle, "uninstall of stale monitor handle ignored"),
        }
    }

    /// Feed one pointer event. Extracted from the rdev callback so the
    /// dispatch logic is testable without a live event tap.
    fn handle_event(inner: &Inner, event_type: &rdev::EventType) {
        match event_type {
            rdev::EventType::MouseMove { x, y } => {
                let mut slots = inner.slots.lock().unwrap();
                slots.pointer = Point { x: *x, y: -*y };
            }
            rdev::EventType::ButtonPress(rdev::Button::Left) => {
                let slots = inner.slots.lock().unwrap();
                let pointer = slots.pointer;
                for registration in [&slots.main, &slots.settings].into_iter().flatten() {
                    let inside = registration
                        .exclusion
                        .iter()
                        .any(|rect| rect.contains(pointer));
                    if !inside {
                        // The callback only posts to the main loop; it never
                        // re-enters the registry from this thread.
                        (registration.on_outside)();
                    }
                }
            }
            _ => {}
        }
    }

    fn ensure_listener(&self) {
        let inner = self.inner.clone();
        self.inner.listener.call_once(move || {
            std::thread::spawn(move || {
                let result = rdev::listen(move |event| {
                    Self::handle_event(&inner, &event.event_type);
                });
                if let Err(e) = result {
                    tracing::error!(?e, "global pointer listener terminated");
                }
            });
        });
    }
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn registry_without_listener() -> MonitorRegistry {
        let registry = MonitorRegistry::new();
        // Tests drive handle_event directly; never start the real tap.
        registry.inner.listener.call_once(|| {});
        registry
    }

    fn counter_callback() -> (DismissFn, Arc<AtomicU32>) {
        let count = Arc::new(AtomicU32::new(0));
        let cloned = count.clone();
        (
            Box::new(move || {
                cloned.fetch_add(1, Ordering::SeqCst);
            }),
            count,
        )
    }

    fn press_at(registry: &MonitorRegistry, x: f64, y_down: f64) {
        MonitorRegistry::handle_event(
            &registry.inner,
            &rdev::EventType::MouseMove { x, y: y_down },
        );
        MonitorRegistry::handle_event(
            &registry.inner,
            &rdev::EventType::ButtonPress(rdev::Button::Left),
        );
    }

    #[test]
    fn press_outside_exclusion_fires() {
        let registry = registry_without_listener();
        let (callback, count) = counter_callback();
        // y-up rect covering y_down in (-450..0), x in (100..600).
        let _handle = registry.install(
            Purpose::MainWindow,
            vec![Rect::new(100.0, -450.0, 500.0, 450.0)],
            callback,
        );
        press_at(&registry, 800.0, 200.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn press_inside_exclusion_is_ignored() {
        let registry = registry_without_listener();
        let (callback, count) = counter_callback();
        let _handle = registry.install(
            Purpose::MainWindow,
            vec![Rect::new(100.0, -450.0, 500.0, 450.0)],
            callback,
        );
        press_at(&registry, 300.0, 200.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn union_of_rects_excludes_both() {
        let registry = registry_without_listener();
        let (callback, count) = counter_callback();
        let _handle = registry.install(
            Purpose::MainWindow,
            vec![
                Rect::new(100.0, -450.0, 500.0, 450.0),
                Rect::new(900.0, -22.0, 24.0, 22.0),
            ],
            callback,
        );
        press_at(&registry, 910.0, 10.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn install_replaces_prior_registration() {
        let registry = registry_without_listener();
        let (first_cb, first) = counter_callback();
        let (second_cb, second) = counter_callback();
        let first_handle = registry.install(Purpose::MainWindow, vec![], first_cb);
        let _second_handle = registry.install(Purpose::MainWindow, vec![], second_cb);
        press_at(&registry, 10.0, 10.0);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        // The replaced handle is stale; uninstalling it must not clear the
        // live registration.
        registry.uninstall(first_handle);
        press_at(&registry, 10.0, 10.0);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn purposes_are_independent() {
        let registry = registry_without_listener();
        let (main_cb, main_count) = counter_callback();
        let (panel_cb, panel_count) = counter_callback();
        let _main = registry.install(
            Purpose::MainWindow,
            vec![Rect::new(0.0, -100.0, 100.0, 100.0)],
            main_cb,
        );
        let panel = registry.install(Purpose::SettingsPanel, vec![], panel_cb);
        press_at(&registry, 50.0, 50.0);
        assert_eq!(main_count.load(Ordering::SeqCst), 0);
        assert_eq!(panel_count.load(Ordering::SeqCst), 1);

        registry.uninstall(panel);
        press_at(&registry, 500.0, 50.0);
        assert_eq!(main_count.load(Ordering::SeqCst), 1);
        assert_eq!(panel_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn uninstall_twice_is_noop() {
        let registry = registry_without_listener();
        let (callback, count) = counter_callback();
        let handle = registry.install(Purpose::SettingsPanel, vec![], callback);
        let token = handle.token;
        registry.uninstall(handle);
        registry.uninstall(MonitorHandle {
            purpose: Purpose::SettingsPanel,
            token,
        });
        press_at(&registry, 10.0, 10.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
