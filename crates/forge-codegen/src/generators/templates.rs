//! Template engine and template sources for code generation.

use super::compose::escape_kotlin;
use super::Backend;
use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

/// Template engine using Handlebars.
///
/// Output is source code, so values are never HTML-escaped, and references
/// to missing values are errors.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        // Register custom helpers
        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Indent helper: `{{indent content 8}}` prefixes every non-blank line
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(4) as usize;

                    out.write(&indent_lines(content, spaces))?;
                    Ok(())
                },
            ),
        );

        // XML helper: `{{xml_escape app_name}}` for attribute and element text
        handlebars.register_helper(
            "xml_escape",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&xml_escape(param))?;
                    Ok(())
                },
            ),
        );

        // Kotlin helper: `"{{kotlin_string app_name}}"` inside a string literal
        handlebars.register_helper(
            "kotlin_string",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&escape_kotlin(param))?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

fn indent_lines(content: &str, spaces: usize) -> String {
    let indent = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where backend templates come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary.
    #[default]
    Builtin,
    /// An on-disk tree laid out as `<root>/<backend>/<template>`.
    Directory(PathBuf),
}

impl TemplateSource {
    /// Load one template of a backend.
    pub fn load(&self, backend: Backend, name: &str) -> Result<Cow<'static, str>> {
        match self {
            Self::Builtin => builtin(backend, name).map(Cow::Borrowed).ok_or_else(|| {
                CodegenError::TemplateMissing(PathBuf::from(backend.template_dir()).join(name))
            }),
            Self::Directory(root) => {
                let path = root.join(backend.template_dir()).join(name);
                if !path.is_file() {
                    return Err(CodegenError::TemplateMissing(path));
                }
                tracing::debug!(path = %path.display(), "loading template");
                Ok(Cow::Owned(fs::read_to_string(&path)?))
            }
        }
    }
}

static BUILTIN: &[(Backend, &str, &str)] = &[
    (
        Backend::Android,
        "MainActivity.kt.hbs",
        include_str!("../../templates/android/MainActivity.kt.hbs"),
    ),
    (
        Backend::Android,
        "Theme.kt.hbs",
        include_str!("../../templates/android/Theme.kt.hbs"),
    ),
    (
        Backend::Android,
        "AndroidManifest.xml.hbs",
        include_str!("../../templates/android/AndroidManifest.xml.hbs"),
    ),
    (
        Backend::Android,
        "app.build.gradle.kts.hbs",
        include_str!("../../templates/android/app.build.gradle.kts.hbs"),
    ),
    (
        Backend::Android,
        "settings.gradle.kts.hbs",
        include_str!("../../templates/android/settings.gradle.kts.hbs"),
    ),
    (
        Backend::Ios,
        "ContentView.swift.hbs",
        include_str!("../../templates/ios/ContentView.swift.hbs"),
    ),
    (
        Backend::Ios,
        "ForgeApp.swift",
        include_str!("../../templates/ios/ForgeApp.swift"),
    ),
    (
        Backend::Ios,
        "Info.plist.hbs",
        include_str!("../../templates/ios/Info.plist.hbs"),
    ),
    (
        Backend::MacOs,
        "ContentView.swift.hbs",
        include_str!("../../templates/macos/ContentView.swift.hbs"),
    ),
    (
        Backend::MacOs,
        "App.swift",
        include_str!("../../templates/macos/App.swift"),
    ),
    (
        Backend::MacOs,
        "Theme.swift",
        include_str!("../../templates/macos/Theme.swift"),
    ),
];

fn builtin(backend: Backend, name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(b, n, _)| *b == backend && *n == name)
        .map(|(_, _, source)| *source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("package {{package_id}}", &json!({"package_id": "com.forge.app"}))
            .unwrap();
        assert_eq!(result, "package com.forge.app");
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{content}}", &json!({"content": "Text(\"<b>&</b>\")"}))
            .unwrap();
        assert_eq!(result, "Text(\"<b>&</b>\")");
    }

    #[test]
    fn test_indent_helper() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string(
                "fun Main() {\n{{indent content 4}}\n}",
                &json!({"content": "Column {\n\n    Text(text = \"Hi\")\n}"}),
            )
            .unwrap();
        assert_eq!(
            result,
            "fun Main() {\n    Column {\n\n        Text(text = \"Hi\")\n    }\n}"
        );
    }

    #[test]
    fn test_escape_helpers() {
        let engine = TemplateEngine::new();
        let data = json!({"app_name": "Tom & \"Jerry\" <x> $y"});

        let xml = engine
            .render_string("<string>{{xml_escape app_name}}</string>", &data)
            .unwrap();
        assert_eq!(
            xml,
            "<string>Tom &amp; &quot;Jerry&quot; &lt;x&gt; $y</string>"
        );

        let kotlin = engine
            .render_string("name = \"{{kotlin_string app_name}}\"", &data)
            .unwrap();
        assert_eq!(kotlin, r#"name = "Tom & \"Jerry\" <x> \$y""#);
    }

    #[test]
    fn test_strict_mode_rejects_missing_values() {
        let engine = TemplateEngine::new();
        let err = engine.render_string("{{nope}}", &json!({})).unwrap_err();
        assert!(matches!(err, CodegenError::TemplateError(_)));
    }

    #[test]
    fn test_every_manifest_entry_is_builtin() {
        for backend in Backend::ALL {
            for file in backend.files() {
                assert!(
                    TemplateSource::Builtin.load(backend, file.template).is_ok(),
                    "{backend}/{} is not built in",
                    file.template
                );
            }
        }
    }

    #[test]
    fn test_directory_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = TemplateSource::Directory(dir.path().to_path_buf());

        match source.load(Backend::Ios, "ContentView.swift.hbs") {
            Err(CodegenError::TemplateMissing(path)) => {
                assert!(path.ends_with("ios/ContentView.swift.hbs"))
            }
            other => panic!("expected TemplateMissing, got {other:?}"),
        }

        std::fs::create_dir_all(dir.path().join("ios")).unwrap();
        std::fs::write(dir.path().join("ios/ContentView.swift.hbs"), "{{content}}").unwrap();
        assert_eq!(
            source.load(Backend::Ios, "ContentView.swift.hbs").unwrap(),
            "{{content}}"
        );
    }
}
