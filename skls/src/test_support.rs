//! In-memory archive writer for tests.

use crate::{Animation, Bone, Envelope, Key, MARKS_FORMAT_VERSION, Mark, ShapeParams};
use byteorder::{LittleEndian, WriteBytesExt};

pub(crate) fn animation(name: &str, format_version: u16, bones: Vec<Bone>) -> Animation {
    Animation {
        name: name.to_string(),
        range_from: 0,
        range_to: 30,
        fps: 30.0,
        format_version,
        flags: 0,
        bone_or_part: 0xFFFF,
        speed: 1.0,
        accuracy: 1.0,
        falloff: 2.0,
        power: 1.0,
        bone_count: bones.len() as u16,
        bones,
    }
}

pub(crate) fn bone(name: &str) -> Bone {
    Bone {
        name: name.to_string(),
        flags: 0,
        envelopes: Default::default(),
    }
}

pub(crate) fn linear_key(value: f32, time: f32) -> Key {
    Key {
        value,
        time,
        shape: crate::KEY_SHAPE_LINEAR,
        params: None,
    }
}

pub(crate) fn tcb_key(value: f32, time: f32, shape: u8) -> Key {
    Key {
        value,
        time,
        shape,
        params: Some(ShapeParams {
            tension: 10,
            continuity: 20,
            bias: 30,
            params: [1, 2, 3, 4],
        }),
    }
}

pub(crate) fn write_cstring(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    out.push(0);
}

fn write_envelope(out: &mut Vec<u8>, envelope: &Envelope) {
    out.write_u8(envelope.behaviour_from).unwrap();
    out.write_u8(envelope.behaviour_to).unwrap();
    out.write_u16::<LittleEndian>(envelope.keys.len() as u16).unwrap();
    for key in &envelope.keys {
        out.write_f32::<LittleEndian>(key.value).unwrap();
        out.write_f32::<LittleEndian>(key.time).unwrap();
        out.write_u8(key.shape).unwrap();
        if let Some(p) = key.params {
            for v in [p.tension, p.continuity, p.bias] {
                out.write_u16::<LittleEndian>(v).unwrap();
            }
            for v in p.params {
                out.write_u16::<LittleEndian>(v).unwrap();
            }
        }
    }
}

/// Encodes the record body (everything after the name). `marks` is written only for
/// version 7 and later.
pub(crate) fn record(animation: &Animation, marks: &[Mark]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(animation.range_from).unwrap();
    out.write_u32::<LittleEndian>(animation.range_to).unwrap();
    out.write_f32::<LittleEndian>(animation.fps).unwrap();
    out.write_u16::<LittleEndian>(animation.format_version).unwrap();
    out.write_u8(animation.flags).unwrap();
    out.write_u16::<LittleEndian>(animation.bone_or_part).unwrap();
    for v in [
        animation.speed,
        animation.accuracy,
        animation.falloff,
        animation.power,
    ] {
        out.write_f32::<LittleEndian>(v).unwrap();
    }
    out.write_u16::<LittleEndian>(animation.bone_count).unwrap();
    for bone in &animation.bones {
        write_cstring(&mut out, bone.name.as_bytes());
        out.write_u8(bone.flags).unwrap();
        for envelope in &bone.envelopes {
            write_envelope(&mut out, envelope);
        }
    }
    if animation.format_version >= MARKS_FORMAT_VERSION {
        out.write_u32::<LittleEndian>(marks.len() as u32).unwrap();
        for mark in marks {
            write_cstring(&mut out, mark.name.as_bytes());
            out.write_u32::<LittleEndian>(mark.intervals.len() as u32).unwrap();
            for &(from, to) in &mark.intervals {
                out.write_f32::<LittleEndian>(from).unwrap();
                out.write_f32::<LittleEndian>(to).unwrap();
            }
        }
    }
    out
}

/// Archive from raw `(name bytes, record body)` pairs.
pub(crate) fn archive_raw(records: &[(&[u8], Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_u32::<LittleEndian>(records.len() as u32).unwrap();
    for (name, body) in records {
        write_cstring(&mut out, name);
        out.extend_from_slice(body);
    }
    out
}

pub(crate) fn archive(animations: &[Animation]) -> Vec<u8> {
    let records = animations
        .iter()
        .map(|a| (a.name.as_bytes(), record(a, &[])))
        .collect::<Vec<_>>();
    archive_raw(&records)
}

/// The single-bone "walk" archive used across tests.
pub(crate) fn walk_animation() -> Animation {
    animation("walk", 6, vec![bone("spine")])
}
