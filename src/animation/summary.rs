use crate::{
    animation::snapshot::TransformSnapshot,
    foundation::core::{Crop, Vec2f},
    foundation::error::{MoveError, MoveResult},
};

/// Render a snapshot in the fixed, re-parseable summary format.
pub fn format_summary(s: &TransformSnapshot) -> String {
    format!(
        "pos: x {:.0} y {:.0} rot: {:.1} scale: x {:.3} y {:.3} bounds: x {:.0} y {:.0} crop: l {} t {} r {} b {}",
        s.position.x,
        s.position.y,
        s.rotation,
        s.scale.x,
        s.scale.y,
        s.bounds.x,
        s.bounds.y,
        s.crop.left,
        s.crop.top,
        s.crop.right,
        s.crop.bottom,
    )
}

/// Parse summary text back into a snapshot.
///
/// Whitespace between tokens is optional and repeatable, numbers may carry any precision and
/// anything after the last crop edge is ignored.
pub fn parse_summary(text: &str) -> MoveResult<TransformSnapshot> {
    let mut sc = Scanner::new(text);
    sc.literal("pos:")?;
    sc.literal("x")?;
    let px = sc.float()?;
    sc.literal("y")?;
    let py = sc.float()?;
    sc.literal("rot:")?;
    let rotation = sc.float()?;
    sc.literal("scale:")?;
    sc.literal("x")?;
    let sx = sc.float()?;
    sc.literal("y")?;
    let sy = sc.float()?;
    sc.literal("bounds:")?;
    sc.literal("x")?;
    let bx = sc.float()?;
    sc.literal("y")?;
    let by = sc.float()?;
    sc.literal("crop:")?;
    sc.literal("l")?;
    let left = sc.int()?;
    sc.literal("t")?;
    let top = sc.int()?;
    sc.literal("r")?;
    let right = sc.int()?;
    sc.literal("b")?;
    let bottom = sc.int()?;

    Ok(TransformSnapshot {
        position: Vec2f::new(px, py),
        rotation,
        scale: Vec2f::new(sx, sy),
        bounds: Vec2f::new(bx, by),
        crop: Crop::new(left, top, right, bottom),
    })
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn literal(&mut self, lit: &str) -> MoveResult<()> {
        self.skip_ws();
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            Ok(())
        } else {
            Err(MoveError::summary(format!(
                "expected '{lit}' at byte {}",
                self.pos
            )))
        }
    }

    /// Length of the longest numeric prefix of `rest`: sign, digits, and for floats an optional
    /// fraction and exponent.
    fn number_len(rest: &[u8], float: bool) -> usize {
        let digits = |from: usize| {
            rest[from..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
        };

        let mut i = 0;
        if matches!(rest.first(), Some(b'+' | b'-')) {
            i += 1;
        }
        let int_digits = digits(i);
        i += int_digits;
        if !float {
            return if int_digits == 0 { 0 } else { i };
        }

        let mut frac_digits = 0;
        if rest.get(i) == Some(&b'.') {
            frac_digits = digits(i + 1);
            if int_digits > 0 || frac_digits > 0 {
                i += 1 + frac_digits;
            }
        }
        if int_digits == 0 && frac_digits == 0 {
            return 0;
        }

        if matches!(rest.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(rest.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            let exp_digits = digits(j);
            if exp_digits > 0 {
                i = j + exp_digits;
            }
        }
        i
    }

    fn token(&mut self, float: bool) -> MoveResult<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let len = Self::number_len(rest.as_bytes(), float);
        if len == 0 {
            return Err(MoveError::summary(format!(
                "expected a number at byte {}",
                self.pos
            )));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn float(&mut self) -> MoveResult<f32> {
        let tok = self.token(true)?;
        let v = tok
            .parse::<f32>()
            .map_err(|e| MoveError::summary(format!("invalid number '{tok}': {e}")))?;
        if !v.is_finite() {
            return Err(MoveError::summary(format!("number '{tok}' is out of range")));
        }
        Ok(v)
    }

    fn int(&mut self) -> MoveResult<i32> {
        let tok = self.token(false)?;
        tok.parse::<i32>()
            .map_err(|e| MoveError::summary(format!("invalid integer '{tok}': {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/summary.rs"]
mod tests;
