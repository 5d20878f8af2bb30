//! Human-readable reports of half-precision values and decoded collections.

use std::collections::HashSet;
use std::io;
use std::num::FpCategory;

use binary16::Half;
use tagged_wire::DynPayload;

use crate::term::style::Palette;

/// Describes one [`Half`], optionally together with the value it was
/// narrowed from.
#[derive(Debug, Clone, Copy)]
pub struct HalfReport {
    value: Half,
    input: Option<f64>,
}

impl HalfReport {
    pub fn new(value: Half) -> Self {
        Self { value, input: None }
    }

    /// Narrows `input` and reports the result.
    pub fn narrowed(input: f64) -> Self {
        Self {
            value: Half::from_f64(input),
            input: Some(input),
        }
    }

    pub fn write<W: io::Write>(&self, w: &mut W, palette: Palette) -> io::Result<()> {
        let Palette {
            bold,
            accent,
            reset,
        } = palette;
        let v = self.value;

        match self.input {
            Some(input) => writeln!(w, "{bold}{input}{reset} -> {accent}{v}{reset}")?,
            None => writeln!(w, "{bold}{:#06x}{reset} -> {accent}{v}{reset}", v.to_bits())?,
        }

        writeln!(
            w,
            "  bits:        {:#06x} [{:b} {:05b} {:010b}]",
            v.to_bits(),
            u8::from(v.is_sign_negative()),
            v.exponent_bits(),
            v.significand_bits(),
        )?;
        writeln!(w, "  class:       {}", class_name(v))?;
        writeln!(w, "  value:       {}", v.to_f64())?;

        if let Some(input) = self.input
            && v.is_finite()
            && input.is_finite()
        {
            writeln!(w, "  error:       {:e}", v.to_f64() - input)?;
        }

        match v.exponent() {
            i32::MIN => writeln!(w, "  exponent:    none (zero)")?,
            i32::MAX => writeln!(w, "  exponent:    none (not finite)")?,
            e => writeln!(w, "  exponent:    {e}")?,
        }

        writeln!(w, "  significand: {}", v.significand())?;
        writeln!(w, "  ulp:         {}", v.ulp())?;
        Ok(())
    }
}

/// Names the IEEE class of `v`, including its sign.
pub fn class_name(v: Half) -> &'static str {
    match (v.classify(), v.is_sign_negative()) {
        (FpCategory::Nan, _) if v.is_signaling_nan() => "signaling NaN",
        (FpCategory::Nan, _) => "quiet NaN",
        (FpCategory::Infinite, false) => "positive infinity",
        (FpCategory::Infinite, true) => "negative infinity",
        (FpCategory::Zero, false) => "positive zero",
        (FpCategory::Zero, true) => "negative zero",
        (FpCategory::Subnormal, false) => "positive subnormal",
        (FpCategory::Subnormal, true) => "negative subnormal",
        (FpCategory::Normal, false) => "positive normal",
        (FpCategory::Normal, true) => "negative normal",
    }
}

/// Parses a bit pattern given as hex, with or without a `0x` prefix.
pub fn parse_bits(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    u16::from_str_radix(digits, 16).map_err(|why| format!("invalid bit pattern {s:?}: {why}"))
}

/// Lists the items of a decoded collection, printing at most `limit`.
pub fn write_items<W: io::Write>(
    w: &mut W,
    items: &[Box<dyn DynPayload>],
    limit: usize,
    palette: Palette,
) -> io::Result<()> {
    let Palette {
        bold,
        accent,
        reset,
    } = palette;

    let types: HashSet<&str> = items.iter().map(|i| i.type_tag()).collect();
    writeln!(
        w,
        "{bold}{} items{reset} across {} types",
        items.len(),
        types.len()
    )?;

    for (index, item) in items.iter().enumerate().take(limit) {
        writeln!(w, "  #{index:<4} {accent}{}{reset} {item:?}", item.type_tag())?;
    }

    if let Some(rest) = items.len().checked_sub(limit).filter(|&r| r != 0) {
        writeln!(w, "  ... and {rest} more")?;
    }

    Ok(())
}
