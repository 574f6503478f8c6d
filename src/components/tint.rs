//! RGBA color carried by particles, notifications and glow hints.
//!
//! The simulation never draws anything; a [`Tint`] only tells the rendering
//! collaborator which color a particle or notification should use. Colors
//! can be written as `#rrggbb` / `#rrggbbaa` strings in world descriptions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::rgb(0xff, 0xff, 0xff);
    /// Consumable pickup green.
    pub const PICKUP: Tint = Tint::rgb(0x00, 0xff, 0x00);
    /// Repeatable interaction sky blue.
    pub const SKY: Tint = Tint::rgb(0x87, 0xce, 0xeb);
    pub const DUST: Tint = Tint::rgb(0xd2, 0xb4, 0x8c);
    pub const GREY: Tint = Tint::rgb(0x99, 0x99, 0x99);
    pub const SUCCESS: Tint = Tint::rgb(0x4c, 0xaf, 0x50);
    pub const ALERT: Tint = Tint::rgb(0xf4, 0x43, 0x36);
    pub const GOLD: Tint = Tint::rgb(0xff, 0xd7, 0x00);
    pub const EXPLOSION: Tint = Tint::rgb(0xff, 0xaa, 0x00);
    pub const YELLOW: Tint = Tint::rgb(0xff, 0xff, 0x00);
    pub const SILVER: Tint = Tint::rgb(0xc0, 0xc0, 0xc0);

    /// Create a new Tint with the specified RGBA values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(text: &str) -> Result<Self, String> {
        let hex = text.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid color '{}': not hexadecimal", text));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| format!("Invalid color '{}': {}", text, e))
        };
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 | 8 => {
                let r = channel(&hex[0..2])?;
                let g = channel(&hex[2..4])?;
                let b = channel(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    channel(&hex[6..8])?
                } else {
                    0xff
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(format!("Invalid color '{}': expected #rrggbb", text)),
        }
    }

    /// `#rrggbb`, with the alpha byte appended only when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

impl Serialize for Tint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Tint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Tint::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Tint::from_hex("#87CEEB").unwrap(), Tint::SKY);
        assert_eq!(Tint::from_hex("fff").unwrap(), Tint::WHITE);
        assert_eq!(
            Tint::from_hex("#00000080").unwrap(),
            Tint::new(0, 0, 0, 0x80)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(Tint::from_hex("#12345").is_err());
        assert!(Tint::from_hex("#gggggg").is_err());
    }

    #[test]
    fn hex_output_parses_back() {
        let c = Tint::new(1, 2, 3, 4);
        assert_eq!(Tint::from_hex(&c.to_hex()).unwrap(), c);
        assert_eq!(Tint::DUST.to_hex(), "#d2b48c");
    }
}
