//! Drawing each screen with crossterm

use std::io::{self, Write};

use crossterm::style::{self, Color};
use crossterm::{cursor, queue, terminal};

use math_catcher::heroes::{Accessory, BodyType, Character, all_characters};
use math_catcher::navigation::Screen;
use math_catcher::sim::GamePhase;
use math_catcher::view::RenderSnapshot;

use super::{App, MENU, Picking};

/// Rows above the play field (score, problem)
const HUD_ROWS: u16 = 3;

/// `#RRGGBB` to a terminal color; anything else leaves the default
fn hex_color(hex: &str) -> Color {
    let Some(digits) = hex.strip_prefix('#').filter(|d| d.len() == 6 && d.is_ascii()) else {
        return Color::Reset;
    };
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb { r, g, b },
        _ => Color::Reset,
    }
}

fn put(out: &mut impl Write, x: u16, y: u16, color: Color, text: &str) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(x, y),
        style::SetForegroundColor(color),
        style::Print(text)
    )
}

fn centered(out: &mut impl Write, cols: u16, y: u16, color: Color, text: &str) -> io::Result<()> {
    let len = text.chars().count() as u16;
    put(out, cols.saturating_sub(len) / 2, y, color, text)
}

fn body_glyph(body: BodyType) -> &'static str {
    match body {
        BodyType::TypeA => "(\u{25A0})",
        BodyType::TypeB => "(\u{25CF})",
        BodyType::TypeC => "[\u{25A0}]",
    }
}

fn accessory_list(accessories: &[Accessory]) -> String {
    if accessories.is_empty() {
        return "none".to_string();
    }
    accessories
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl App {
    pub fn draw(&self, out: &mut impl Write, cols: u16, rows: u16, now: f64) -> io::Result<()> {
        let palette = self.settings.palette();
        queue!(
            out,
            style::SetBackgroundColor(hex_color(palette.gradient[0])),
            terminal::Clear(terminal::ClearType::All)
        )?;

        match self.nav.current() {
            Screen::Splash => self.draw_splash(out, cols, rows)?,
            Screen::Menu => self.draw_menu(out, cols)?,
            Screen::CharacterSelection => self.draw_selection(out, cols)?,
            Screen::CreateHero => self.draw_builder(out, cols)?,
            Screen::HeroPreview { hero } => {
                self.draw_ready(out, cols, rows, "Your Hero is Ready!", &Character::from(hero))?
            }
            Screen::SelectedCharacter { character } => {
                self.draw_ready(out, cols, rows, "Get Ready!", character)?
            }
            Screen::Game { character } => {
                if let Some(snapshot) = &self.snapshot {
                    self.draw_game(out, cols, rows, now, snapshot, character)?;
                }
            }
        }

        queue!(out, style::ResetColor)?;
        out.flush()
    }

    fn title_color(&self) -> Color {
        hex_color(self.settings.palette().title)
    }

    fn text_color(&self) -> Color {
        hex_color(self.settings.palette().text)
    }

    fn hint_color(&self) -> Color {
        hex_color(self.settings.palette().card_description)
    }

    fn draw_notice(&self, out: &mut impl Write, cols: u16, y: u16) -> io::Result<()> {
        match &self.notice {
            Some(notice) => centered(out, cols, y, Color::Yellow, notice),
            None => Ok(()),
        }
    }

    fn draw_splash(&self, out: &mut impl Write, cols: u16, rows: u16) -> io::Result<()> {
        let mid = rows / 2;
        centered(out, cols, mid.saturating_sub(1), self.title_color(), "LearnPlay")?;
        centered(out, cols, mid + 1, self.hint_color(), "press any key")
    }

    fn draw_menu(&self, out: &mut impl Write, cols: u16) -> io::Result<()> {
        put(out, 2, 1, self.title_color(), "LearnPlay")?;
        let theme = format!("[t] {} mode", self.settings.theme.toggled().as_str());
        put(out, cols.saturating_sub(theme.len() as u16 + 2), 1, self.hint_color(), &theme)?;

        let mut y = 3;
        for (i, (name, description)) in MENU.iter().enumerate() {
            put(out, 4, y, self.text_color(), &format!("{}. {name}", i + 1))?;
            put(out, 7, y + 1, self.hint_color(), description)?;
            y += 3;
        }
        put(
            out,
            4,
            y,
            self.hint_color(),
            "[Enter] play  [c] continue saved game  [q] quit",
        )?;
        self.draw_notice(out, cols, y + 2)
    }

    fn draw_selection(&self, out: &mut impl Write, cols: u16) -> io::Result<()> {
        put(out, 2, 1, self.title_color(), "Choose Your Character")?;

        let characters = all_characters(&self.roster);
        let mut y = 3;
        for (i, character) in characters.iter().enumerate() {
            let marker = if character.is_custom() { " (custom)" } else { "" };
            put(out, 4, y, self.text_color(), &format!("{}.", i + 1))?;
            put(out, 8, y, hex_color(&character.color), body_glyph(character.body_type))?;
            put(
                out,
                13,
                y,
                self.text_color(),
                &format!("{}{marker}", character.name),
            )?;
            y += 1;
        }

        y += 1;
        let prompt = match &self.picking {
            Picking::Character => {
                "[1-9] pick  [n] create your hero  [d] delete a hero  [Esc] back".to_string()
            }
            Picking::Delete => "Press the number of the custom hero to delete".to_string(),
            Picking::Confirm(id) => {
                let name = self.roster.get(id).map(|h| h.name.as_str()).unwrap_or("hero");
                format!("Delete {name}? [y] yes, any other key cancels")
            }
        };
        put(out, 4, y, self.hint_color(), &prompt)?;
        self.draw_notice(out, cols, y + 2)
    }

    fn draw_builder(&self, out: &mut impl Write, cols: u16) -> io::Result<()> {
        let draft = &self.draft;
        put(out, 2, 1, self.title_color(), "Create Your Hero")?;
        put(out, 4, 3, self.text_color(), &format!("Name: {}_", draft.name))?;
        put(
            out,
            4,
            5,
            self.text_color(),
            &format!("Body [Tab]: {}", draft.body_type.name()),
        )?;
        put(out, 4, 6, self.text_color(), "Color [\u{2190}/\u{2192}]:")?;
        put(out, 23, 6, hex_color(draft.color), "\u{2588}\u{2588}\u{2588}")?;

        let mut x = 4;
        put(out, x, 7, self.text_color(), "Accessories:")?;
        x += 13;
        for (i, accessory) in Accessory::ALL.iter().enumerate() {
            let check = if draft.has_accessory(*accessory) { "x" } else { " " };
            let label = format!("[{check}] {} {}  ", i + 1, accessory.name());
            put(out, x, 7, self.text_color(), &label)?;
            x += label.chars().count() as u16;
        }

        put(out, 4, 9, hex_color(draft.color), body_glyph(draft.body_type))?;
        put(out, 4, 11, self.hint_color(), "[Enter] save hero  [Esc] back")?;
        self.draw_notice(out, cols, 13)
    }

    fn draw_ready(
        &self,
        out: &mut impl Write,
        cols: u16,
        rows: u16,
        title: &str,
        character: &Character,
    ) -> io::Result<()> {
        let mid = rows / 2;
        centered(out, cols, mid.saturating_sub(3), self.title_color(), title)?;
        centered(out, cols, mid.saturating_sub(1), hex_color(&character.color), body_glyph(character.body_type))?;
        centered(out, cols, mid + 1, self.text_color(), &character.name)?;
        let extras = format!("Accessories: {}", accessory_list(&character.accessories));
        centered(out, cols, mid + 2, self.hint_color(), &extras)?;
        self.draw_notice(out, cols, mid + 4)
    }

    fn draw_game(
        &self,
        out: &mut impl Write,
        cols: u16,
        rows: u16,
        now: f64,
        snapshot: &RenderSnapshot,
        character: &Character,
    ) -> io::Result<()> {
        let config = self.game.config();
        let field_rows = rows.saturating_sub(HUD_ROWS + 1).max(1);
        let sx = cols as f32 / config.screen_width;
        let sy = field_rows as f32 / config.screen_height;
        let shake = self.effects.shake_offset(now);
        let to_cell = |x: f32, y: f32| -> Option<(u16, u16)> {
            let col = ((x + shake) * sx).round();
            let row = (y * sy).round();
            (col >= 0.0 && row >= 0.0 && col < cols as f32 && row < field_rows as f32)
                .then_some((col as u16, row as u16 + HUD_ROWS))
        };

        let hearts = "\u{2665}".repeat(snapshot.lives as usize);
        put(out, 1, 0, self.text_color(), &format!("Score: {}", snapshot.score))?;
        put(out, cols.saturating_sub(12), 0, Color::Red, &format!("Lives: {hearts}"))?;
        centered(out, cols, 1, self.title_color(), &snapshot.problem_text)?;
        if let Some(banner) = self.effects.banner(now) {
            centered(out, cols, 2, Color::Yellow, banner)?;
        }

        let half = config.object_size / 2.0;
        for object in &snapshot.objects {
            let label = format!("({})", object.label);
            let x = object.position.x + half - label.len() as f32 / 2.0 / sx;
            if let Some((col, row)) = to_cell(x, object.position.y + half) {
                put(out, col, row, hex_color(object.color_class.hex()), &label)?;
            }
        }

        for (position, t) in self.effects.pops(now) {
            let glyph = if t < 0.5 { "*" } else { "+" };
            let spread = config.object_size * (0.5 + t);
            let center = position + half;
            for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
                if let Some((col, row)) = to_cell(center.x + dx * spread, center.y + dy * spread) {
                    put(out, col, row, Color::Yellow, glyph)?;
                }
            }
        }

        let head_y = config.head_y();
        if let Some((col, row)) = to_cell(snapshot.catcher_position, head_y) {
            let width = ((config.catcher_width * sx).round() as usize).max(3);
            let bar = "\u{2580}".repeat(width);
            put(out, col, row, hex_color(&character.color), &bar)?;
            let glyph = body_glyph(character.body_type);
            let glyph_col = col + (width as u16).saturating_sub(3) / 2;
            put(out, glyph_col, row + 1, hex_color(&character.color), glyph)?;
        }

        if snapshot.phase == GamePhase::GameOver {
            let mid = HUD_ROWS + field_rows / 2;
            centered(out, cols, mid.saturating_sub(1), Color::Red, "Game Over!")?;
            centered(
                out,
                cols,
                mid,
                self.title_color(),
                &format!("Final Score: {}", snapshot.score),
            )?;
            centered(out, cols, mid + 2, self.hint_color(), "[r] Try Again  [x] Exit")?;
        } else {
            put(
                out,
                1,
                rows.saturating_sub(1),
                self.hint_color(),
                "[\u{2190}/\u{2192}] move  [Esc] leave",
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#FF6B6B"), Color::Rgb { r: 255, g: 107, b: 107 });
        assert_eq!(hex_color("rgba(255, 255, 255, 0.95)"), Color::Reset);
        assert_eq!(hex_color("#12"), Color::Reset);
        assert_eq!(hex_color("#GG0000"), Color::Reset);
    }

    #[test]
    fn test_accessory_list() {
        assert_eq!(accessory_list(&[]), "none");
        assert_eq!(accessory_list(&[Accessory::Cape, Accessory::Hat]), "Cape, Hat");
    }
}
