//! Pointer capture registry.
//!
//! Drag sessions keep receiving pointer-move/pointer-up even when the
//! pointer wanders off the element that started them. Each session holds a
//! [`CaptureGuard`]; while the guard is alive its owner is routed every
//! global pointer event, and dropping or releasing the guard detaches it.

use std::fmt;
use std::rc::{Rc, Weak};
use std::cell::RefCell;
use uuid::Uuid;

use crate::types::{shared, Shared};

/// Handle identifying one attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Component that receives captured pointer events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaptureOwner {
    /// The viewport's pan session.
    Viewport,
    /// The box editor of the detection with this id.
    Detection(String),
}

impl fmt::Display for CaptureOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewport => write!(f, "viewport"),
            Self::Detection(id) => write!(f, "detection {}", id),
        }
    }
}

type Listeners = Vec<(SubscriptionId, CaptureOwner)>;

/// Registry of active capture listeners, in attach order.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    listeners: Shared<Listeners>,
}

impl PointerCapture {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: shared(Vec::new()),
        }
    }

    /// Attaches a listener for `owner` until the returned guard goes away.
    pub fn acquire(&self, owner: CaptureOwner) -> CaptureGuard {
        let id = SubscriptionId::new();
        self.listeners.borrow_mut().push((id, owner.clone()));
        tracing::debug!("Capture {} attached for {}", id, owner);
        CaptureGuard {
            id,
            owner,
            registry: Rc::downgrade(&self.listeners),
        }
    }

    /// Owners currently holding a capture, oldest first.
    pub fn owners(&self) -> Vec<CaptureOwner> {
        self.listeners
            .borrow()
            .iter()
            .map(|(_, owner)| owner.clone())
            .collect()
    }

    /// Whether `owner` holds at least one capture.
    pub fn is_captured_by(&self, owner: &CaptureOwner) -> bool {
        self.listeners.borrow().iter().any(|(_, o)| o == owner)
    }

    /// Number of attached listeners.
    pub fn active_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// True when no listener is attached.
    pub fn is_idle(&self) -> bool {
        self.active_count() == 0
    }
}

/// Scoped ownership of one capture listener.
///
/// The listener is detached by [`CaptureGuard::release`] or on drop,
/// whichever comes first.
#[derive(Debug)]
pub struct CaptureGuard {
    id: SubscriptionId,
    owner: CaptureOwner,
    registry: Weak<RefCell<Listeners>>,
}

impl CaptureGuard {
    /// The subscription this guard owns.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The component receiving the captured events.
    pub fn owner(&self) -> &CaptureOwner {
        &self.owner
    }

    /// Detaches the listener now.
    pub fn release(self) {
        drop(self);
    }

    fn detach(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut listeners = registry.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != self.id);
        if listeners.len() != before {
            tracing::debug!("Capture {} released by {}", self.id, self.owner);
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.detach();
    }
}
