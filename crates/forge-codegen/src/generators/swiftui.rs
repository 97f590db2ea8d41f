//! SwiftUI dialects and Apple project manifests.
//!
//! macOS and iOS share SwiftUI tokens and differ in button layout and the
//! default action identifier.

use super::TemplateFile;
use crate::lower::{escape_literal, Dialect};

/// SwiftUI token table used for macOS.
pub static SWIFTUI: Dialect = Dialect {
    name: "swiftui",
    indent: "    ",
    vertical: "VStack",
    horizontal: "HStack",
    default_action: "unknown",
    escape: escape_swift,
    text,
    button,
};

/// SwiftUI token table used for iOS. Buttons stay on one line.
pub static SWIFTUI_COMPACT: Dialect = Dialect {
    name: "swiftui-compact",
    indent: "    ",
    vertical: "VStack",
    horizontal: "HStack",
    default_action: "",
    escape: escape_swift,
    text,
    button: compact_button,
};

/// Files of the iOS project, relative to `.forge/native/ios`.
pub static IOS_FILES: &[TemplateFile] = &[
    TemplateFile {
        template: "ContentView.swift.hbs",
        output: "ContentView.swift",
        verbatim: false,
    },
    TemplateFile {
        template: "ForgeApp.swift",
        output: "ForgeApp.swift",
        verbatim: true,
    },
    TemplateFile {
        template: "Info.plist.hbs",
        output: "Info.plist",
        verbatim: false,
    },
];

/// Files of the macOS project, relative to `.forge/native/apple/macos`.
pub static MACOS_FILES: &[TemplateFile] = &[
    TemplateFile {
        template: "ContentView.swift.hbs",
        output: "ForgeApp/ContentView.swift",
        verbatim: false,
    },
    TemplateFile {
        template: "App.swift",
        output: "ForgeApp/App.swift",
        verbatim: true,
    },
    TemplateFile {
        template: "Theme.swift",
        output: "ForgeApp/Theme.swift",
        verbatim: true,
    },
];

/// Swift spells unicode escapes `\u{1b}`.
fn escape_swift(value: &str) -> String {
    escape_literal(value, |ch| format!("\\u{{{:x}}}", ch as u32))
}

fn text(content: &str) -> String {
    format!("Text(\"{}\")", content)
}

fn button(label: &str, action: &str) -> String {
    format!(
        "Button(action: {{ print(\"Action: {}\") }}) {{\n    Text(\"{}\")\n}}",
        action, label
    )
}

fn compact_button(label: &str, action: &str) -> String {
    format!(
        "Button(action: {{ print(\"Action: {}\") }}) {{ Text(\"{}\") }}",
        action, label
    )
}
