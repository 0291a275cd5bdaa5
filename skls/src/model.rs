use std::fmt;

/// Oldest record layout this crate reads.
pub const MIN_FORMAT_VERSION: u16 = 6;

/// First layout that appends a marks section to each record.
pub const MARKS_FORMAT_VERSION: u16 = 7;

/// Key shape that stores no tension/continuity/bias/params block.
pub const KEY_SHAPE_LINEAR: u8 = 4;

pub const ENVELOPE_COUNT: usize = 6;

/// One decoded animation record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Animation {
    pub name: String,
    pub range_from: u32,
    pub range_to: u32,
    pub fps: f32,
    pub format_version: u16,
    pub flags: u8,
    pub bone_or_part: u16,
    pub speed: f32,
    pub accuracy: f32,
    pub falloff: f32,
    pub power: f32,
    pub bone_count: u16,
    pub bones: Vec<Bone>,
}

impl Animation {
    pub fn duration_frames(&self) -> u32 {
        self.range_to.saturating_sub(self.range_from)
    }

    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "name={}, range_from={}, range_to={}, fps={}, format_version={}, flags={}, bone_or_part={}, speed={}, accuracy={}, falloff={}, power={}, bone_count={}",
            self.name,
            self.range_from,
            self.range_to,
            self.fps,
            self.format_version,
            self.flags,
            self.bone_or_part,
            self.speed,
            self.accuracy,
            self.falloff,
            self.power,
            self.bone_count,
        )?;
        for bone in &self.bones {
            writeln!(f, "\t{}", bone.name)?;
            for envelope in &bone.envelopes {
                f.write_str("\t\t")?;
                for (i, key) in envelope.keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{}:{}", key.time, key.value)?;
                }
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Bone {
    pub name: String,
    /// Stored verbatim; the reader does not interpret it.
    pub flags: u8,
    /// Indexed by [`Channel::index`].
    pub envelopes: [Envelope; ENVELOPE_COUNT],
}

impl Bone {
    pub fn envelope(&self, channel: Channel) -> &Envelope {
        &self.envelopes[channel.index()]
    }
}

/// The six fixed degrees of freedom of a bone, in storage order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Channel {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
}

impl Channel {
    pub const ALL: [Channel; ENVELOPE_COUNT] = [
        Self::TranslateX,
        Self::TranslateY,
        Self::TranslateZ,
        Self::RotateX,
        Self::RotateY,
        Self::RotateZ,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::TranslateX => 0,
            Self::TranslateY => 1,
            Self::TranslateZ => 2,
            Self::RotateX => 3,
            Self::RotateY => 4,
            Self::RotateZ => 5,
        }
    }

    pub fn is_rotation(self) -> bool {
        self.index() >= 3
    }
}

/// Keyframes for one channel of one bone.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Envelope {
    pub behaviour_from: u8,
    pub behaviour_to: u8,
    /// Storage order. The exporter writes them by time but this is not checked.
    pub keys: Vec<Key>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Key {
    pub value: f32,
    pub time: f32,
    pub shape: u8,
    /// `None` exactly when `shape == KEY_SHAPE_LINEAR`; those bytes are not in the file.
    pub params: Option<ShapeParams>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ShapeParams {
    pub tension: u16,
    pub continuity: u16,
    pub bias: u16,
    pub params: [u16; 4],
}

/// Named set of frame intervals stored after the bones in version 7+ records.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Mark {
    pub name: String,
    pub intervals: Vec<(f32, f32)>,
}
