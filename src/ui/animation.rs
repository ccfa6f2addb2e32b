//! Decorative animation state. Each value is stepped by a scheduler task and
//! read by the renderer; nothing here touches playback.

/// Header color that breathes along a sine wave.
#[derive(Debug, Default, Clone)]
pub struct TitlePulse {
    phase: f32,
}

impl TitlePulse {
    pub fn step(&mut self) {
        self.phase = (self.phase + 0.1) % std::f32::consts::TAU;
    }

    /// RGB with the red channel oscillating in `1..=255`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let intensity = (128.0 + 127.0 * self.phase.sin()).round() as u8;
        (intensity, 255, 136)
    }
}

const SPINNER_FRAMES: [&str; 8] = ["◐", "◓", "◑", "◒", "◐", "◓", "◑", "◒"];

/// Now-playing spinner; only advances while audio is playing.
#[derive(Debug, Default, Clone)]
pub struct Spinner {
    index: usize,
}

impl Spinner {
    pub fn step(&mut self) {
        self.index = (self.index + 1) % SPINNER_FRAMES.len();
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.index]
    }
}

const LOADING_GLYPHS: [&str; 4] = ["⟳", "⟲", "⟳", "⟲"];

/// Rotating glyph shown while the file picker is open.
#[derive(Debug, Default, Clone)]
pub struct LoadingIndicator {
    angle: u16,
}

impl LoadingIndicator {
    pub fn step(&mut self) {
        self.angle = (self.angle + 30) % 360;
    }

    pub fn glyph(&self) -> &'static str {
        LOADING_GLYPHS[(self.angle / 90) as usize % LOADING_GLYPHS.len()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Opacity ramp for popups, in tenths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fade {
    level: u8,
    direction: FadeDirection,
}

impl Fade {
    pub fn fade_in() -> Self {
        Self {
            level: 0,
            direction: FadeDirection::In,
        }
    }

    pub fn fade_out_from(&self) -> Self {
        Self {
            level: self.level,
            direction: FadeDirection::Out,
        }
    }

    pub fn step(&mut self) {
        self.level = match self.direction {
            FadeDirection::In => (self.level + 1).min(10),
            FadeDirection::Out => self.level.saturating_sub(1),
        };
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Opacity in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        f32::from(self.level) / 10.0
    }

    /// Fade-in reached full opacity or fade-out reached zero.
    pub fn is_settled(&self) -> bool {
        match self.direction {
            FadeDirection::In => self.level == 10,
            FadeDirection::Out => self.level == 0,
        }
    }

    /// Blend `fg` toward `bg` by the current opacity.
    pub fn blend(&self, fg: (u8, u8, u8), bg: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.alpha();
        let mix = |f: u8, b: u8| (f32::from(b) + (f32::from(f) - f32::from(b)) * a).round() as u8;
        (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
    }
}

/// Highlight toggle for the now-playing label.
#[derive(Debug, Default, Clone)]
pub struct LabelPulse {
    on: bool,
}

impl LabelPulse {
    pub fn step(&mut self) {
        self.on = !self.on;
    }

    pub fn reset(&mut self) {
        self.on = false;
    }

    pub fn is_highlighted(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_pulse_stays_in_range_and_moves() {
        let mut p = TitlePulse::default();
        let start = p.rgb();
        assert_eq!(start, (128, 255, 136));
        let mut seen_low = false;
        for _ in 0..200 {
            p.step();
            let (r, g, b) = p.rgb();
            assert!(r >= 1);
            assert_eq!((g, b), (255, 136));
            seen_low |= r < 20;
        }
        assert!(seen_low);
    }

    #[test]
    fn spinner_and_loading_wrap_around() {
        let mut s = Spinner::default();
        let first = s.frame();
        for _ in 0..SPINNER_FRAMES.len() {
            s.step();
        }
        assert_eq!(s.frame(), first);

        let mut l = LoadingIndicator::default();
        assert_eq!(l.glyph(), "⟳");
        for _ in 0..3 {
            l.step();
        }
        assert_eq!(l.glyph(), "⟲");
        for _ in 0..9 {
            l.step();
        }
        assert_eq!(l.glyph(), "⟳");
    }

    #[test]
    fn fade_in_then_out_settles() {
        let mut f = Fade::fade_in();
        assert_eq!(f.alpha(), 0.0);
        assert!(!f.is_settled());
        for _ in 0..15 {
            f.step();
        }
        assert!(f.is_settled());
        assert_eq!(f.alpha(), 1.0);

        let mut out = f.fade_out_from();
        assert_eq!(out.direction(), FadeDirection::Out);
        assert!(!out.is_settled());
        for _ in 0..10 {
            out.step();
        }
        assert!(out.is_settled());
        assert_eq!(out.alpha(), 0.0);
    }

    #[test]
    fn blend_interpolates_toward_background() {
        let mut f = Fade::fade_in();
        assert_eq!(f.blend((255, 255, 255), (0, 0, 0)), (0, 0, 0));
        for _ in 0..5 {
            f.step();
        }
        assert_eq!(f.blend((200, 100, 0), (0, 0, 0)), (100, 50, 0));
    }
}
