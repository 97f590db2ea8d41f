//! Jetpack Compose dialect and Android project manifest.

use super::TemplateFile;
use crate::lower::{escape_literal, Dialect};

/// Log tag used by generated button handlers.
const LOG_TAG: &str = "ForgeApp";

/// Jetpack Compose token table.
pub static COMPOSE: Dialect = Dialect {
    name: "compose",
    indent: "    ",
    vertical: "Column",
    horizontal: "Row",
    default_action: "unknown",
    escape: escape_kotlin,
    text,
    button,
};

/// Files of the Android project, relative to `.forge/native/android`.
pub static ANDROID_FILES: &[TemplateFile] = &[
    TemplateFile {
        template: "MainActivity.kt.hbs",
        output: "app/src/main/java/{{package_path}}/MainActivity.kt",
        verbatim: false,
    },
    TemplateFile {
        template: "Theme.kt.hbs",
        output: "app/src/main/java/{{package_path}}/ui/theme/Theme.kt",
        verbatim: false,
    },
    TemplateFile {
        template: "AndroidManifest.xml.hbs",
        output: "app/src/main/AndroidManifest.xml",
        verbatim: false,
    },
    TemplateFile {
        template: "app.build.gradle.kts.hbs",
        output: "app/build.gradle.kts",
        verbatim: false,
    },
    TemplateFile {
        template: "settings.gradle.kts.hbs",
        output: "settings.gradle.kts",
        verbatim: false,
    },
];

/// Kotlin string literals also interpolate `$`, and spell unicode escapes
/// with exactly four hex digits.
pub(crate) fn escape_kotlin(value: &str) -> String {
    escape_literal(value, |ch| format!("\\u{:04x}", ch as u32)).replace('$', "\\$")
}

fn text(content: &str) -> String {
    format!("Text(text = \"{}\")", content)
}

fn button(label: &str, action: &str) -> String {
    format!(
        "Button(onClick = {{ Log.d(\"{}\", \"Button clicked: {}\") }}) {{\n    Text(text = \"{}\")\n}}",
        LOG_TAG, action, label
    )
}
