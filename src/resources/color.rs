use glam::{Vec3, Vec4};

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Vec3);

impl Color {
    pub const WHITE: Color = Color(Vec3::ONE);
    pub const BLACK: Color = Color(Vec3::ZERO);

    /// Builds a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self(Vec3::new(r, g, b))
    }

    #[must_use]
    pub fn to_hex(self) -> u32 {
        let c = (self.0.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        ((c.x as u32) << 16) | ((c.y as u32) << 8) | c.z as u32
    }

    /// Parses `#rrggbb`, `0xrrggbb` or a CSS color keyword.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let hex = text
            .strip_prefix('#')
            .or_else(|| text.strip_prefix("0x"))
            .or_else(|| text.strip_prefix("0X"));
        if let Some(digits) = hex {
            return match digits.len() {
                6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
                3 => {
                    let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                    u32::from_str_radix(&expanded, 16).ok().map(Self::from_hex)
                }
                _ => None,
            };
        }
        named(&text.to_ascii_lowercase()).map(Self::from_hex)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Vec4 {
        self.0.extend(alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

fn named(name: &str) -> Option<u32> {
    let hex = match name {
        "white" => 0xffffff,
        "black" => 0x000000,
        "red" => 0xff0000,
        "green" => 0x008000,
        "lime" => 0x00ff00,
        "blue" => 0x0000ff,
        "yellow" => 0xffff00,
        "pink" => 0xffc0cb,
        "hotpink" => 0xff69b4,
        "orange" => 0xffa500,
        "purple" => 0x800080,
        "cyan" | "aqua" => 0x00ffff,
        "magenta" | "fuchsia" => 0xff00ff,
        "gray" | "grey" => 0x808080,
        "silver" => 0xc0c0c0,
        "gold" => 0xffd700,
        "navy" => 0x000080,
        "teal" => 0x008080,
        "maroon" => 0x800000,
        "olive" => 0x808000,
        "coral" => 0xff7f50,
        "salmon" => 0xfa8072,
        "violet" => 0xee82ee,
        "indigo" => 0x4b0082,
        "brown" => 0xa52a2a,
        "skyblue" => 0x87ceeb,
        _ => return None,
    };
    Some(hex)
}
