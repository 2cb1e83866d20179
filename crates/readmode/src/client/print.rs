// Author: Dustin Pilgrim
// License: MIT

use readmode_core::colour::{button_text_colour, label_colour, to_button_colour};
use readmode_core::{OverlayLayers, Palette, Rgb, Selection};
use readmode_ipc::{Event, Response};

fn colour_name(c: Rgb) -> &'static str {
    if c == Rgb::BLACK { "black" } else { "white" }
}

pub fn layers_line(layers: Option<&OverlayLayers>) -> String {
    match layers {
        None => "layers: none (read mode off)".to_string(),
        Some(l) => {
            let tint = l.tint.map(|t| t.to_string()).unwrap_or_else(|| "none".into());
            format!("layers: dim {} (alpha {}) tint {}", l.dim, l.dim.a, tint)
        }
    }
}

/// Returns false when the response was an error.
pub fn print_response(resp: Response) -> bool {
    match resp {
        Response::Ok => println!("ok"),

        Response::Status { read_mode_on, selected, palette, layers } => {
            println!("read_mode: {}", if read_mode_on { "on" } else { "off" });
            println!("selected: {selected}");
            match palette.position_of(selected) {
                Some(p) => println!("position: {p}"),
                None => println!("position: (not in {palette:?} palette)"),
            }
            println!("{}", layers_line(layers.as_ref()));
        }

        Response::Settings { settings, active } => {
            println!("read_mode: {}", if settings.read_mode_on { "on" } else { "off" });
            println!("selected: {}", settings.selected);
            println!("custom_colour: {}", settings.custom_colour);
            println!("shared_levels: {}", settings.shared_levels);
            println!("shared: intensity {} brightness {}", settings.intensity, settings.brightness);
            println!("active: intensity {} brightness {}", active.intensity, active.brightness);
        }

        Response::Layers { layers } => println!("{}", layers_line(layers.as_ref())),

        Response::Error { message } => {
            eprintln!("error: {message}");
            return false;
        }
    }
    true
}

pub fn print_event(ev: &Event) {
    match ev {
        Event::ReadModeChanged { on } => {
            println!("read_mode: {}", if *on { "on" } else { "off" })
        }
        Event::SettingsChanged { settings, active } => println!(
            "settings: {} intensity {} brightness {}",
            settings.selected, active.intensity, active.brightness
        ),
        Event::LayersChanged { layers } => println!("{}", layers_line(layers.as_ref())),
    }
}

pub fn print_palette(palette: Palette) {
    for (pos, sel) in palette.entries().enumerate() {
        match sel {
            Selection::Preset(p) => {
                let rgb = p.rgb();
                println!("{pos}: {sel:<12} {rgb}  text {}", colour_name(button_text_colour(rgb)));
            }
            _ => println!("{pos}: {sel}"),
        }
    }
}

pub fn print_swatch(hex: &str) -> Result<(), String> {
    let swatch = to_button_colour(hex).map_err(|e| e.to_string())?;
    let rgb = swatch.rgb();
    println!("button: {swatch}");
    println!("button_text: {}", colour_name(button_text_colour(rgb)));
    println!("label_on_background: {}", colour_name(label_colour(rgb)));
    println!("luma: {:.1}", rgb.luma());
    Ok(())
}
