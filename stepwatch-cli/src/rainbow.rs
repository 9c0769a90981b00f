// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Rainbow-colored console output for banners and final results.

use std::f64::consts::PI;

/// Prints the text in the rainbow fashion.
pub fn rainbow_println<S: AsRef<str>>(line: S) {
    println!("{}", colorize(line.as_ref()));
}

/// Wraps each visible character of `text` in a 24-bit color escape. Colors
/// restart on every line so stacked lines form vertical bands.
pub fn colorize(text: &str) -> String {
    let frequency: f64 = 0.1;
    let spread: f64 = 3.0;
    text.split('\n')
        .map(|line| {
            line.chars()
                .enumerate()
                .map(|(i, c)| {
                    if c.is_whitespace() {
                        c.to_string()
                    } else {
                        let (r, g, b) = rgb(frequency, spread, i as f64);
                        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, c)
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generates RGB for rainbow print.
fn rgb(freq: f64, spread: f64, i: f64) -> (u8, u8, u8) {
    let j = i / spread;
    let red = (freq * j + 0.0).sin() * 127.0 + 128.0;
    let green = (freq * j + 2.0 * PI / 3.0).sin() * 127.0 + 128.0;
    let blue = (freq * j + 4.0 * PI / 3.0).sin() * 127.0 + 128.0;

    (red as u8, green as u8, blue as u8)
}
