use core::future::Future;

use stick_core::{KeyCode, Modifiers};

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Report dropped (e.g., host not polling fast enough).
    Dropped,
    /// Endpoint busy.
    Busy,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::NotReady => write!(f, "device not ready"),
            Self::Dropped => write!(f, "report dropped"),
            Self::Busy => write!(f, "endpoint busy"),
        }
    }
}

/// Async trait for pointer and keyboard output.
///
/// This trait abstracts the HID transport the motion engine drives
/// (USB HID, BLE HID, a host-side mock). Implementations clamp deltas to
/// whatever their report format can carry.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait PointerSink {
    /// Move the pointer by a relative amount.
    fn move_pointer(&mut self, dx: i32, dy: i32) -> impl Future<Output = Result<(), OutputError>>;

    /// Click the wheels: positive `vertical` scrolls up, positive
    /// `horizontal` scrolls right.
    fn scroll(&mut self, vertical: i32, horizontal: i32)
        -> impl Future<Output = Result<(), OutputError>>;

    /// Set the held state of the left, middle and right buttons.
    fn set_buttons(&mut self, buttons: [bool; 3]) -> impl Future<Output = Result<(), OutputError>>;

    /// Hold a key down.
    fn press_key(&mut self, key: KeyCode) -> impl Future<Output = Result<(), OutputError>>;

    /// Release a held key.
    fn release_key(&mut self, key: KeyCode) -> impl Future<Output = Result<(), OutputError>>;

    /// Press and release a key with modifiers held.
    fn tap_key(&mut self, key: KeyCode, mods: Modifiers)
        -> impl Future<Output = Result<(), OutputError>>;

    /// Wait for the host to pick up the previous reports.
    fn settle(&mut self, ms: u32) -> impl Future<Output = ()>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}
