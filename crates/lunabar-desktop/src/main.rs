#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    lunabar_desktop::run();
}
