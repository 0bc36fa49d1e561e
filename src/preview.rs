/// Terminal preview of an area color assignment.
use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor};

use crate::color::hex_to_rgb;
use crate::types::AreaColor;

const SWATCH: &str = "    ";

fn swatch_color(hex: &str) -> Option<Color> {
    hex_to_rgb(hex).map(|(r, g, b)| Color::Rgb { r, g, b })
}

/// One line per area: swatch, area, CSS variable and hex value.
///
/// `plain` drops escape sequences so the output can be piped or diffed.
pub fn write_assignment<W: Write>(out: &mut W, areas: &[AreaColor], plain: bool) -> Result<()> {
    if areas.is_empty() {
        writeln!(out, "No areas given.")?;
        return Ok(());
    }
    let width = areas.iter().map(|a| a.area.chars().count()).max().unwrap_or(0);
    for area in areas {
        match swatch_color(&area.color).filter(|_| !plain) {
            Some(color) => {
                queue!(out, SetBackgroundColor(color), Print(SWATCH), ResetColor)?;
                queue!(
                    out,
                    Print(" "),
                    SetAttribute(Attribute::Bold),
                    Print(format!("{:<width$}", area.area)),
                    SetAttribute(Attribute::Reset),
                )?;
            }
            None => write!(out, "{:<width$}", area.area)?,
        }
        writeln!(out, "  --{}  {}", area.var_name, area.color)?;
    }
    out.flush()?;
    Ok(())
}
