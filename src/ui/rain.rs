//! Digital-rain animation drawn over the transcript while a request is in
//! flight. Mounted when a submission starts, dropped the instant it settles.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

/// Half-width katakana plus digits, the classic rain alphabet.
const GLYPHS: &[char] = &[
    'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｳ', 'ｼ', 'ﾅ', 'ﾓ', 'ﾆ', 'ｻ', 'ﾜ', 'ﾂ', 'ｵ', 'ﾘ', 'ｱ', 'ﾎ', 'ﾃ', 'ﾏ',
    'ｹ', 'ﾒ', 'ｴ', 'ｶ', 'ｷ', 'ﾑ', 'ﾕ', 'ﾗ', 'ｾ', 'ﾈ', 'ｽ', 'ﾀ', 'ﾇ', '0', '1', '2', '3', '4',
    '5', '7', '8', '9',
];

/// Small splitmix-style generator; the rain only needs cheap, unseeded
/// variety, not quality randomness.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed | 1,
        }
    }

    fn from_entropy() -> Self {
        let mut bytes = [0u8; 8];
        if getrandom::fill(&mut bytes).is_err() {
            return Self::new(0x9e37_79b9_7f4a_7c15);
        }
        Self::new(u64::from_le_bytes(bytes))
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform-ish value in `0..bound`; bound 0 yields 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        ((self.next_u64() >> 32) as u32) % bound
    }
}

struct Column {
    /// Row of the leading glyph; negative while still above the area.
    head: i32,
    len: u16,
    /// Ticks per row of movement; higher is slower.
    speed: u8,
    phase: u8,
    seed: u64,
}

pub struct RainState {
    width: u16,
    height: u16,
    columns: Vec<Column>,
    rng: Rng,
}

impl RainState {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_rng(width, height, Rng::from_entropy())
    }

    fn with_rng(width: u16, height: u16, mut rng: Rng) -> Self {
        let columns = (0..width).map(|_| Self::spawn(&mut rng, height)).collect();
        Self {
            width,
            height,
            columns,
            rng,
        }
    }

    fn spawn(rng: &mut Rng, height: u16) -> Column {
        let drop_zone = u32::from(height.max(1));
        Column {
            head: -(rng.below(drop_zone * 2) as i32),
            len: (3 + rng.below(drop_zone.max(4) - 3)) as u16,
            speed: 1 + rng.below(3) as u8,
            phase: 0,
            seed: rng.next_u64(),
        }
    }

    /// Re-seeds the drops when the transcript area changes size.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.columns = (0..width)
            .map(|_| Self::spawn(&mut self.rng, height))
            .collect();
    }

    /// Advances every drop one animation step; columns that have fully left
    /// the bottom respawn above the top.
    pub fn tick(&mut self) {
        let height = self.height;
        for column in &mut self.columns {
            column.phase = column.phase.wrapping_add(1);
            if column.phase % column.speed == 0 {
                column.head += 1;
            }
            if column.head - i32::from(column.len) > i32::from(height) {
                *column = Self::spawn(&mut self.rng, height);
            }
        }
    }

    fn glyph_at(seed: u64, row: i32) -> char {
        let mixed = seed ^ (row as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        GLYPHS[(mixed % GLYPHS.len() as u64) as usize]
    }
}

impl Widget for &RainState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (index, column) in self.columns.iter().enumerate() {
            let x = area.x.saturating_add(index as u16);
            if x >= area.right() {
                break;
            }
            for offset in 0..column.len {
                let row = column.head - i32::from(offset);
                if row < 0 || row >= i32::from(area.height) {
                    continue;
                }
                let y = area.y + row as u16;
                let style = if offset == 0 {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else if offset <= column.len / 2 {
                    Style::default().fg(Color::LightGreen)
                } else {
                    Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
                };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(RainState::glyph_at(column.seed, row));
                    cell.set_style(style);
                }
            }
        }
    }
}
