//! Static voice catalogue.
//!
//! The five [`VOICES`] are the speaker personas offered by the synthesis
//! provider. The list is fixed at compile time; the form only ever stores
//! ids taken from it.

// ---------------------------------------------------------------------------
// VoiceOption
// ---------------------------------------------------------------------------

/// A selectable synthetic speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceOption {
    /// Opaque provider identifier sent with every synthesis request.
    pub id: &'static str,
    /// Label shown in the voice picker.
    pub name: &'static str,
}

/// All voices offered by the widget, in display order.
///
/// The first entry is the fallback default.
pub const VOICES: &[VoiceOption] = &[
    VoiceOption {
        id: "21m00Tcm4TlvDq8ikWAM",
        name: "Rachel",
    },
    VoiceOption {
        id: "AZnzlk1XvdvUeBnXmlld",
        name: "Domi",
    },
    VoiceOption {
        id: "EXAVITQu4vr4xnSDxMaL",
        name: "Sarah",
    },
    VoiceOption {
        id: "MF3mGyEYCl7XYWbV9V6O",
        name: "Elli",
    },
    VoiceOption {
        id: "TxGEqnHWrfWFTfGW9XjX",
        name: "Antoni",
    },
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up a voice by its provider id.
pub fn find_voice(id: &str) -> Option<&'static VoiceOption> {
    VOICES.iter().find(|v| v.id == id)
}

/// The voice a fresh form starts with.
pub fn default_voice() -> &'static VoiceOption {
    &VOICES[0]
}

/// Resolve a configured voice id, falling back to [`default_voice`] when
/// the id is not in the catalogue.
pub fn voice_or_default(id: &str) -> &'static VoiceOption {
    find_voice(id).unwrap_or_else(|| {
        log::warn!("unknown voice id {id:?} in config; using {}", default_voice().name);
        default_voice()
    })
}
