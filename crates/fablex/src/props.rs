use serde::Serialize;

/// The raw sub-fields of an Excellon tool property group such as `C0.8F200S65`.
///
/// Values are kept as text since their units depend on the file header.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ToolProperties<'a> {
    /// `C`: tool diameter.
    pub diameter: Option<&'a str>,
    /// `F`: feed rate.
    pub feed_rate: Option<&'a str>,
    /// `S`: spindle speed.
    pub spindle_speed: Option<&'a str>,
    /// `B`: retract rate.
    pub retract_rate: Option<&'a str>,
    /// `H`: maximum hit count.
    pub max_hits: Option<&'a str>,
    /// `Z`: depth offset.
    pub depth_offset: Option<&'a str>,
}

impl<'a> ToolProperties<'a> {
    /// Splits `lexeme` into `<letter><digits and dots>` groups.
    ///
    /// Unknown letters are skipped and the first occurrence of a repeated letter wins.
    pub fn parse(lexeme: &'a str) -> Self {
        let mut props = Self::default();
        let mut rest = lexeme;
        while let Some(letter) = rest.chars().next() {
            let body = &rest[letter.len_utf8()..];
            let len = body
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(body.len());
            let value = &body[..len];
            rest = &body[len..];

            let slot = match letter {
                'C' => &mut props.diameter,
                'F' => &mut props.feed_rate,
                'S' => &mut props.spindle_speed,
                'B' => &mut props.retract_rate,
                'H' => &mut props.max_hits,
                'Z' => &mut props.depth_offset,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value);
            }
        }
        props
    }
}
