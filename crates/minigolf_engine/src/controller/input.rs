//! Key state decoding
//!
//! Turns the raw per-frame key bitmask into intents for the ball
//! controller. Decoding is pure: it depends only on the current shot
//! phase, the camera mode and the key masks of this and the previous frame.

/// Shot lifecycle of the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotPhase {
    /// At rest, waiting for the player to start a shot
    #[default]
    Idle,
    /// Charge key held, power accumulating
    Aiming,
    /// In flight or rolling
    Moving,
}

/// Whether the camera follows the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Orbiting the ball; ball input is live
    #[default]
    Attached,
    /// Detached free-fly camera; ball input is ignored
    Free,
}

impl CameraMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Attached => Self::Free,
            Self::Free => Self::Attached,
        }
    }
}

bitflags::bitflags! {
    /// Keys held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyState: u8 {
        /// Rotate aim left
        const LOOK_LEFT = 1 << 0;
        /// Rotate aim right
        const LOOK_RIGHT = 1 << 1;
        /// Tilt up, or raise power while aiming
        const LOOK_UP = 1 << 2;
        /// Tilt down, or lower power while aiming
        const LOOK_DOWN = 1 << 3;
        /// Hold to charge, release to shoot
        const CHARGE = 1 << 4;
        /// Switch between attached and free camera
        const TOGGLE_CAMERA = 1 << 5;
    }
}

/// What the player asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intents {
    /// Yaw direction, -1, 0 or 1
    pub yaw_input: f32,
    /// Pitch direction, -1, 0 or 1
    pub pitch_input: f32,
    /// Power direction while aiming, -1, 0 or 1
    pub power_input: f32,
    /// Enter the aiming phase
    pub begin_charge: bool,
    /// Shoot with the accumulated power
    pub release_charge: bool,
    /// Switch camera mode
    pub toggle_camera: bool,
}

fn axis(keys: KeyState, positive: KeyState, negative: KeyState) -> f32 {
    let mut value = 0.0;
    if keys.contains(positive) {
        value += 1.0;
    }
    if keys.contains(negative) {
        value -= 1.0;
    }
    value
}

/// Decode this frame's keys into intents.
///
/// The camera toggle fires on the key-down edge only. When the camera is
/// (or becomes) free, no other intent is produced.
pub fn decode_intents(
    phase: ShotPhase,
    camera: CameraMode,
    keys: KeyState,
    previous_keys: KeyState,
) -> Intents {
    let toggle_camera =
        keys.contains(KeyState::TOGGLE_CAMERA) && !previous_keys.contains(KeyState::TOGGLE_CAMERA);
    let camera = if toggle_camera { camera.toggled() } else { camera };

    let mut intents = Intents {
        toggle_camera,
        ..Intents::default()
    };
    if camera == CameraMode::Free {
        return intents;
    }

    intents.yaw_input = axis(keys, KeyState::LOOK_RIGHT, KeyState::LOOK_LEFT);
    let vertical = axis(keys, KeyState::LOOK_UP, KeyState::LOOK_DOWN);

    match phase {
        ShotPhase::Idle => {
            intents.pitch_input = vertical;
            intents.begin_charge = keys.contains(KeyState::CHARGE);
        }
        ShotPhase::Aiming => {
            intents.power_input = vertical;
            intents.release_charge = !keys.contains(KeyState::CHARGE);
        }
        ShotPhase::Moving => {
            intents.pitch_input = vertical;
        }
    }
    intents
}
