//! Record grammar for one `.skls` animation.
//!
//! A record starts at the first byte after the animation name. The byte layout is walked in
//! exactly one place, [`walk_record`]; decoding, skipping and mark extraction are visitors
//! over that walk, so all of them consume the same span for the same input.

use crate::{
    Animation, Bone, ByteCursor, Channel, Error, Key, KEY_SHAPE_LINEAR, MARKS_FORMAT_VERSION,
    MIN_FORMAT_VERSION, Mark, ReadOptions, Result, ShapeParams, Terminator,
};

/// Scalar fields in front of the bone table.
#[derive(Copy, Clone, Debug)]
struct RecordHeader {
    range_from: u32,
    range_to: u32,
    fps: f32,
    format_version: u16,
    flags: u8,
    bone_or_part: u16,
    speed: f32,
    accuracy: f32,
    falloff: f32,
    power: f32,
    bone_count: u16,
}

/// Receives record fields in storage order.
///
/// Strings are the only variable-width leaves, so visitors decide how each kind of name is
/// consumed (decoded or skipped).
trait RecordVisitor {
    type BoneName;
    type MarkName;

    fn read_bone_name(&mut self, input: &mut ByteCursor<'_>) -> Result<Self::BoneName>;
    fn read_mark_name(&mut self, input: &mut ByteCursor<'_>) -> Result<Self::MarkName>;

    fn bone(&mut self, _name: Self::BoneName, _flags: u8) {}
    fn envelope(&mut self, _channel: Channel, _from: u8, _to: u8, _key_count: u16) {}
    fn key(&mut self, _key: Key) {}
    fn mark(&mut self, _name: Self::MarkName) {}
    fn interval(&mut self, _from: f32, _to: f32) {}
}

fn walk_record<V: RecordVisitor>(
    input: &mut ByteCursor<'_>,
    visitor: &mut V,
) -> Result<RecordHeader> {
    let range_from = input.read_u32()?;
    let range_to = input.read_u32()?;
    let fps = input.read_f32()?;
    let format_version = input.read_u16()?;
    if format_version < MIN_FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            version: format_version,
        });
    }

    let header = RecordHeader {
        range_from,
        range_to,
        fps,
        format_version,
        flags: input.read_u8()?,
        bone_or_part: input.read_u16()?,
        speed: input.read_f32()?,
        accuracy: input.read_f32()?,
        falloff: input.read_f32()?,
        power: input.read_f32()?,
        bone_count: input.read_u16()?,
    };

    for _ in 0..header.bone_count {
        let name = visitor.read_bone_name(input)?;
        let flags = input.read_u8()?;
        visitor.bone(name, flags);

        for channel in Channel::ALL {
            let from = input.read_u8()?;
            let to = input.read_u8()?;
            let key_count = input.read_u16()?;
            visitor.envelope(channel, from, to, key_count);
            for _ in 0..key_count {
                visitor.key(read_key(input)?);
            }
        }
    }

    if header.format_version >= MARKS_FORMAT_VERSION {
        let mark_count = input.read_u32()?;
        for _ in 0..mark_count {
            let name = visitor.read_mark_name(input)?;
            visitor.mark(name);
            let interval_count = input.read_u32()?;
            for _ in 0..interval_count {
                let from = input.read_f32()?;
                let to = input.read_f32()?;
                visitor.interval(from, to);
            }
        }
    }

    Ok(header)
}

fn read_key(input: &mut ByteCursor<'_>) -> Result<Key> {
    let value = input.read_f32()?;
    let time = input.read_f32()?;
    let shape = input.read_u8()?;
    let params = if shape != KEY_SHAPE_LINEAR {
        Some(ShapeParams {
            tension: input.read_u16()?,
            continuity: input.read_u16()?,
            bias: input.read_u16()?,
            params: [
                input.read_u16()?,
                input.read_u16()?,
                input.read_u16()?,
                input.read_u16()?,
            ],
        })
    } else {
        None
    };
    Ok(Key {
        value,
        time,
        shape,
        params,
    })
}

struct Skipper;

impl RecordVisitor for Skipper {
    type BoneName = ();
    type MarkName = ();

    fn read_bone_name(&mut self, input: &mut ByteCursor<'_>) -> Result<()> {
        input.skip_cstring(Terminator::Nul)
    }

    fn read_mark_name(&mut self, input: &mut ByteCursor<'_>) -> Result<()> {
        input.skip_cstring(Terminator::Nul)
    }
}

struct AnimationBuilder {
    options: ReadOptions,
    bones: Vec<Bone>,
    channel: Channel,
}

impl RecordVisitor for AnimationBuilder {
    type BoneName = String;
    type MarkName = ();

    fn read_bone_name(&mut self, input: &mut ByteCursor<'_>) -> Result<String> {
        input.read_cstring(Terminator::Nul, self.options.text)
    }

    // Marks are not part of `Animation`; see `decode_marks`.
    fn read_mark_name(&mut self, input: &mut ByteCursor<'_>) -> Result<()> {
        input.skip_cstring(Terminator::Nul)
    }

    fn bone(&mut self, name: String, flags: u8) {
        self.bones.push(Bone {
            name,
            flags,
            envelopes: Default::default(),
        });
    }

    fn envelope(&mut self, channel: Channel, from: u8, to: u8, key_count: u16) {
        self.channel = channel;
        if let Some(bone) = self.bones.last_mut() {
            let envelope = &mut bone.envelopes[channel.index()];
            envelope.behaviour_from = from;
            envelope.behaviour_to = to;
            envelope.keys.reserve_exact(key_count as usize);
        }
    }

    fn key(&mut self, key: Key) {
        if let Some(bone) = self.bones.last_mut() {
            bone.envelopes[self.channel.index()].keys.push(key);
        }
    }
}

struct MarkCollector {
    options: ReadOptions,
    marks: Vec<Mark>,
}

impl RecordVisitor for MarkCollector {
    type BoneName = ();
    type MarkName = String;

    fn read_bone_name(&mut self, input: &mut ByteCursor<'_>) -> Result<()> {
        input.skip_cstring(Terminator::Nul)
    }

    fn read_mark_name(&mut self, input: &mut ByteCursor<'_>) -> Result<String> {
        input.read_cstring(Terminator::Nul, self.options.text)
    }

    fn mark(&mut self, name: String) {
        self.marks.push(Mark {
            name,
            intervals: Vec::new(),
        });
    }

    fn interval(&mut self, from: f32, to: f32) {
        if let Some(mark) = self.marks.last_mut() {
            mark.intervals.push((from, to));
        }
    }
}

/// Decodes the record at the cursor. `name` is the already-consumed animation name.
///
/// On success the cursor is at the end of the record, marks section included.
pub fn decode_animation(
    input: &mut ByteCursor<'_>,
    name: impl Into<String>,
    options: ReadOptions,
) -> Result<Animation> {
    let name = name.into();
    log::trace!("decoding animation {name:?} at offset {}", input.tell());

    let mut builder = AnimationBuilder {
        options,
        bones: Vec::new(),
        channel: Channel::TranslateX,
    };
    let header = walk_record(input, &mut builder)?;

    Ok(Animation {
        name,
        range_from: header.range_from,
        range_to: header.range_to,
        fps: header.fps,
        format_version: header.format_version,
        flags: header.flags,
        bone_or_part: header.bone_or_part,
        speed: header.speed,
        accuracy: header.accuracy,
        falloff: header.falloff,
        power: header.power,
        bone_count: header.bone_count,
        bones: builder.bones,
    })
}

/// Advances the cursor past one record without building anything.
pub fn skip_animation(input: &mut ByteCursor<'_>) -> Result<()> {
    walk_record(input, &mut Skipper).map(|_| ())
}

/// Collects the marks of the record at the cursor. Records older than version 7 have none.
pub fn decode_marks(input: &mut ByteCursor<'_>, options: ReadOptions) -> Result<Vec<Mark>> {
    let mut collector = MarkCollector {
        options,
        marks: Vec::new(),
    };
    walk_record(input, &mut collector)?;
    Ok(collector.marks)
}
