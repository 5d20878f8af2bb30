//! Small half-precision geometry and color types used by `demo` and `dump`.

use binary16::Half;
use serde::{Deserialize, Serialize};
use tagged_wire::{BinaryReader, BinaryWriter, DynPayload, Payload};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point16 {
    pub x: Half,
    pub y: Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size16 {
    pub width: Half,
    pub height: Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect16 {
    pub origin: Point16,
    pub size: Size16,
}

/// A color with channels nominally in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba16 {
    pub r: Half,
    pub g: Half,
    pub b: Half,
    pub a: Half,
}

tagged_wire::serde_payload! {
    Point16 = "wire_tool.point16",
    Size16 = "wire_tool.size16",
    Rect16 = "wire_tool.rect16",
}

impl Payload for Rgba16 {
    const TYPE_TAG: &'static str = "wire_tool.rgba16";

    fn write_payload(&self, w: &mut BinaryWriter) -> tagged_wire::Result<()> {
        for channel in [self.r, self.g, self.b, self.a] {
            w.write(channel);
        }
        Ok(())
    }

    fn read_payload(r: &mut BinaryReader<'_>) -> tagged_wire::Result<Self> {
        let [red, green, blue, alpha] = [r.read()?, r.read()?, r.read()?, r.read()?];
        Ok(Self {
            r: red,
            g: green,
            b: blue,
            a: alpha,
        })
    }
}

tagged_wire::type_registry! {
    /// Every type `wire_tool` can decode.
    pub static SHAPES = [Point16, Size16, Rect16, Rgba16];
}

fn half(v: f32) -> Half {
    Half::from_f32(v)
}

/// Builds `count` sample items, cycling through every registered type.
pub fn demo_items(count: usize) -> Vec<Box<dyn DynPayload>> {
    (0..count)
        .map(|i| -> Box<dyn DynPayload> {
            let t = i as f32;
            let origin = Point16 {
                x: half(t * 1.5),
                y: half(-t / 3.0),
            };
            let size = Size16 {
                width: half(16.0 + t),
                height: half(9.0 + t * 0.25),
            };

            match i % 4 {
                0 => Box::new(origin),
                1 => Box::new(size),
                2 => Box::new(Rect16 { origin, size }),
                _ => Box::new(Rgba16 {
                    r: half(1.0 / (1.0 + t)),
                    g: half(0.5),
                    b: half(t / 100.0),
                    a: Half::ONE,
                }),
            }
        })
        .collect()
}
