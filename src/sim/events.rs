//! Fire-and-forget sound triggers emitted toward the audio collaborator.
//!
//! The core never touches audio hardware; it queues named triggers on the
//! owning player and the host drains them once per frame.

/// Named sound events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundTrigger {
    /// First jump grunt
    Jump1,
    /// Alternate jump grunt
    Jump2,
    /// Shot impact crater
    Explode1,
    /// Grenade / drill detonation
    Explode2,
    /// Drill biting into terrain
    Drill1,
}

impl SoundTrigger {
    /// Stable wire name consumed by the audio collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundTrigger::Jump1 => "jump_1",
            SoundTrigger::Jump2 => "jump_2",
            SoundTrigger::Explode1 => "explode_1",
            SoundTrigger::Explode2 => "explode_2",
            SoundTrigger::Drill1 => "drill_1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_names_are_stable() {
        assert_eq!(SoundTrigger::Jump1.as_str(), "jump_1");
        assert_eq!(SoundTrigger::Jump2.as_str(), "jump_2");
        assert_eq!(SoundTrigger::Explode1.as_str(), "explode_1");
        assert_eq!(SoundTrigger::Explode2.as_str(), "explode_2");
        assert_eq!(SoundTrigger::Drill1.as_str(), "drill_1");
    }
}
