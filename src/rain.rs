//! Falling-glyph backdrop state.
//!
//! The field only tracks column heads; drawing is left to the caller. The
//! random source is passed in so the frontend can use `Math.random` and
//! tests can use a fixed sequence.

pub const DEFAULT_CHARSET: &str =
    "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン0123456789ABCDEF";

pub const HEAD_ALPHA: f64 = 0.8;
pub const TRAIL_ALPHA: f64 = 0.3;

/// Chance per frame that a column which left the bottom edge restarts.
const RESET_THRESHOLD: f64 = 0.975;

#[derive(Clone, Debug, PartialEq)]
pub struct RainSettings {
    pub color: &'static str,
    pub charset: &'static str,
    pub font_size: f64,
    pub speed: f64,
    pub opacity: f64,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            color: "#c084fc",
            charset: DEFAULT_CHARSET,
            font_size: 14.0,
            speed: 0.5,
            opacity: 0.15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub x: f64,
    pub y: f64,
    pub head: char,
    pub trail: char,
}

pub struct RainField {
    chars: Vec<char>,
    font_size: f64,
    speed: f64,
    columns: Vec<f64>,
    height: f64,
}

impl RainField {
    pub fn new(settings: &RainSettings) -> Self {
        let mut chars: Vec<char> = settings.charset.chars().collect();
        if chars.is_empty() {
            chars = DEFAULT_CHARSET.chars().collect();
        }

        Self {
            chars,
            font_size: settings.font_size.max(1.0),
            speed: settings.speed,
            columns: Vec::new(),
            height: 0.0,
        }
    }

    pub fn columns(&self) -> &[f64] {
        &self.columns
    }

    /// Rebuild the columns for a canvas of `width` x `height` CSS pixels.
    /// Each column starts somewhere above the top edge.
    pub fn resize(&mut self, width: f64, height: f64, random: &mut impl FnMut() -> f64) {
        let count = (width.max(0.0) / self.font_size).floor() as usize;
        self.height = height.max(0.0);
        self.columns = (0..count)
            .map(|_| random() * -self.height / self.font_size)
            .collect();
    }

    /// Advance one frame and return the glyphs to draw for it.
    pub fn step(&mut self, random: &mut impl FnMut() -> f64) -> Vec<Glyph> {
        let mut glyphs = Vec::with_capacity(self.columns.len());

        for index in 0..self.columns.len() {
            let head = self.pick(random);
            let trail = self.pick(random);
            let x = index as f64 * self.font_size;
            let y = self.columns[index] * self.font_size;
            glyphs.push(Glyph { x, y, head, trail });

            if y > self.height && random() > RESET_THRESHOLD {
                self.columns[index] = 0.0;
            }
            self.columns[index] += self.speed;
        }

        glyphs
    }

    fn pick(&self, random: &mut impl FnMut() -> f64) -> char {
        let index = (random() * self.chars.len() as f64) as usize;
        self.chars[index.min(self.chars.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    fn settings() -> RainSettings {
        RainSettings {
            charset: "AB",
            font_size: 10.0,
            speed: 0.5,
            ..RainSettings::default()
        }
    }

    #[test]
    fn resize_creates_one_column_per_font_width() {
        let mut field = RainField::new(&settings());
        field.resize(105.0, 200.0, &mut constant(0.5));

        assert_eq!(field.columns().len(), 10);
        assert!(field.columns().iter().all(|&row| row == -10.0));
    }

    #[test]
    fn step_advances_every_column() {
        let mut field = RainField::new(&settings());
        field.resize(30.0, 200.0, &mut constant(0.0));

        let glyphs = field.step(&mut constant(0.0));
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs[2].x, 20.0);
        assert_eq!(glyphs[0].head, 'A');
        assert!(field.columns().iter().all(|&row| row == 0.5));
    }

    #[test]
    fn column_below_bottom_resets_only_on_high_roll() {
        let mut field = RainField::new(&settings());
        field.resize(10.0, 20.0, &mut constant(0.0));
        field.columns = vec![5.0];

        field.step(&mut constant(0.5));
        assert_eq!(field.columns(), &[5.5]);

        field.step(&mut constant(0.99));
        assert_eq!(field.columns(), &[0.5]);
    }

    #[test]
    fn pick_never_indexes_past_charset() {
        let mut field = RainField::new(&settings());
        field.resize(10.0, 20.0, &mut constant(0.0));

        let glyphs = field.step(&mut constant(1.0));
        assert_eq!(glyphs[0].head, 'B');
    }

    #[test]
    fn empty_charset_falls_back_to_default() {
        let field = RainField::new(&RainSettings {
            charset: "",
            ..RainSettings::default()
        });
        assert_eq!(field.chars.len(), DEFAULT_CHARSET.chars().count());
    }
}
