//! The "On This Day" web page.
//!
//! Rendered with plain string formatting. Every value taken from a note goes
//! through [`html_escape`]; links are percent-encoded first.

use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDate;
use salthaven_notes::NoteDocument;

use super::helpers::{format_long_date, pluralize};

/// Text shown when no note matches.
pub const EMPTY_STATE: &str = "No notes found for this day";

const STYLE: &str = r#"
        :root {
            --bg-primary: #f9f9f9;
            --bg-secondary: white;
            --text-primary: #333;
            --text-secondary: #7f8c8d;
            --text-tertiary: #95a5a6;
            --text-accent: #2c3e50;
            --text-content: #34495e;
            --border-color: #eee;
            --shadow: rgba(0,0,0,0.1);
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --bg-primary: #1a1a1a;
                --bg-secondary: #2d2d2d;
                --text-primary: #e0e0e0;
                --text-secondary: #b0b0b0;
                --text-tertiary: #888;
                --text-accent: #64b5f6;
                --text-content: #d0d0d0;
                --border-color: #444;
                --shadow: rgba(0,0,0,0.3);
            }
        }

        [data-theme="dark"] {
            --bg-primary: #1a1a1a;
            --bg-secondary: #2d2d2d;
            --text-primary: #e0e0e0;
            --text-secondary: #b0b0b0;
            --text-tertiary: #888;
            --text-accent: #64b5f6;
            --text-content: #d0d0d0;
            --border-color: #444;
            --shadow: rgba(0,0,0,0.3);
        }

        [data-theme="light"] {
            --bg-primary: #f9f9f9;
            --bg-secondary: white;
            --text-primary: #333;
            --text-secondary: #7f8c8d;
            --text-tertiary: #95a5a6;
            --text-accent: #2c3e50;
            --text-content: #34495e;
            --border-color: #eee;
            --shadow: rgba(0,0,0,0.1);
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: var(--text-primary);
            background-color: var(--bg-primary);
            transition: background-color 0.3s ease, color 0.3s ease;
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            padding: 20px;
            background: var(--bg-secondary);
            border-radius: 8px;
            box-shadow: 0 2px 4px var(--shadow);
            position: relative;
        }
        .header h1 { color: var(--text-accent); margin: 0; }
        .header p { color: var(--text-secondary); margin: 10px 0 0 0; }
        .theme-toggle {
            position: absolute;
            top: 20px;
            right: 20px;
            background: none;
            border: 2px solid var(--text-tertiary);
            border-radius: 50%;
            width: 40px;
            height: 40px;
            cursor: pointer;
            font-size: 18px;
            display: flex;
            align-items: center;
            justify-content: center;
            color: var(--text-tertiary);
        }
        .theme-toggle:hover {
            border-color: var(--text-accent);
            color: var(--text-accent);
            transform: scale(1.1);
        }
        .note {
            background: var(--bg-secondary);
            margin: 20px 0;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 4px var(--shadow);
        }
        .note-header {
            border-bottom: 1px solid var(--border-color);
            padding-bottom: 10px;
            margin-bottom: 15px;
        }
        .note-title { font-size: 1.3em; font-weight: bold; margin: 0; }
        .note-title-link { color: var(--text-accent); text-decoration: none; }
        .note-title-link:hover { text-decoration: underline; opacity: 0.8; }
        .note-date { color: var(--text-secondary); font-size: 0.9em; margin: 5px 0; }
        .note-path { color: var(--text-tertiary); font-size: 0.8em; font-family: monospace; }
        .note-content { white-space: pre-wrap; color: var(--text-content); }
        .no-notes {
            text-align: center;
            color: var(--text-secondary);
            font-style: italic;
            padding: 40px;
            background: var(--bg-secondary);
            border-radius: 8px;
            box-shadow: 0 2px 4px var(--shadow);
        }
        .footer {
            text-align: center;
            margin-top: 30px;
            padding: 20px;
            color: var(--text-tertiary);
            font-size: 0.9em;
        }
        .footer a { color: var(--text-accent); text-decoration: none; }
        .footer a:hover { text-decoration: underline; }

        .checkbox-item { display: flex; align-items: flex-start; margin: 2px 0; line-height: 1.5; }
        .checkbox {
            width: 12px;
            height: 12px;
            margin-right: 6px;
            margin-top: 3px;
            border: 1px solid var(--text-tertiary);
            border-radius: 2px;
            background: var(--bg-secondary);
            flex-shrink: 0;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .checkbox.checked { background: var(--text-accent); border-color: var(--text-accent); }
        .checkbox.checked::after {
            content: '\2713';
            color: var(--bg-secondary);
            font-size: 9px;
            font-weight: bold;
            line-height: 1;
        }
        .checkbox-text { flex: 1; color: var(--text-content); }
"#;

const SCRIPT: &str = r#"
        function getStoredTheme() {
            return localStorage.getItem('theme');
        }

        function setStoredTheme(theme) {
            localStorage.setItem('theme', theme);
        }

        function getPreferredTheme() {
            const storedTheme = getStoredTheme();
            if (storedTheme) {
                return storedTheme;
            }
            return window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
        }

        function setTheme(theme) {
            document.documentElement.setAttribute('data-theme', theme);
            const themeIcon = document.querySelector('.theme-icon');
            if (themeIcon) {
                themeIcon.textContent = theme === 'dark' ? '☀️' : '🌙';
            }
        }

        function toggleTheme() {
            const currentTheme = document.documentElement.getAttribute('data-theme');
            const newTheme = currentTheme === 'dark' ? 'light' : 'dark';
            setTheme(newTheme);
            setStoredTheme(newTheme);
        }

        window.matchMedia('(prefers-color-scheme: dark)').addEventListener('change', function(e) {
            if (!getStoredTheme()) {
                setTheme(e.matches ? 'dark' : 'light');
            }
        });

        // Markdown task items: "- [ ] text" and "- [x] text".
        function convertCheckboxes() {
            document.querySelectorAll('.note-content').forEach(function(content) {
                let html = content.innerHTML;

                html = html.replace(/^(\s*)([-*])\s+\[\s\]\s+(.+)$/gm, function(match, indent, bullet, text) {
                    return indent + '<div class="checkbox-item">' +
                           '<div class="checkbox"></div>' +
                           '<span class="checkbox-text">' + text + '</span>' +
                           '</div>';
                });

                html = html.replace(/^(\s*)([-*])\s+\[[xX]\]\s+(.+)$/gm, function(match, indent, bullet, text) {
                    return indent + '<div class="checkbox-item checked">' +
                           '<div class="checkbox checked"></div>' +
                           '<span class="checkbox-text">' + text + '</span>' +
                           '</div>';
                });

                content.innerHTML = html;
            });
        }

        document.addEventListener('DOMContentLoaded', function() {
            setTheme(getPreferredTheme());
            convertCheckboxes();
        });
"#;

/// Escapes text for use in HTML content and attribute values.
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Builds the `obsidian://open` link for an absolute note path.
pub fn obsidian_link(absolute: &Path) -> String {
    format!(
        "obsidian://open?path={}",
        urlencoding::encode(&absolute.to_string_lossy())
    )
}

/// Renders the full page for `today`.
///
/// `notes` are shown in the order given; paths are displayed relative to
/// `root`.
pub fn render_page(root: &Path, today: NaiveDate, notes: &[NoteDocument]) -> String {
    let date = today.format("%A, %B %-d").to_string();
    let count = notes.len();

    let cards = if notes.is_empty() {
        format!(
            "    <div class=\"no-notes\">\n        {}\n    </div>\n",
            EMPTY_STATE
        )
    } else {
        notes.iter().map(|note| render_note(root, note)).collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>On This Day - {date}</title>
    <style>{style}</style>
</head>
<body>
    <div class="header">
        <button class="theme-toggle" onclick="toggleTheme()" title="Toggle dark/light mode">
            <span class="theme-icon">&#x1F319;</span>
        </button>
        <h1>On This Day</h1>
        <p>{date} &bull; {count} {noun} found</p>
    </div>

{cards}
    <div class="footer">
        Generated by Salthaven &bull; <a href="javascript:location.reload()">Refresh</a>
    </div>

    <script>{script}</script>
</body>
</html>
"#,
        date = html_escape(&date),
        style = STYLE,
        count = count,
        noun = pluralize(count, "entry", "entries"),
        cards = cards,
        script = SCRIPT,
    )
}

/// Renders one note card.
fn render_note(root: &Path, note: &NoteDocument) -> String {
    let mut card = String::new();

    card.push_str("    <div class=\"note\">\n        <div class=\"note-header\">\n");
    if !note.title.is_empty() {
        let _ = writeln!(
            card,
            "            <h2 class=\"note-title\"><a href=\"{}\" class=\"note-title-link\">{}</a></h2>",
            html_escape(&obsidian_link(&note.absolute_path())),
            html_escape(&note.title)
        );
    }
    let _ = writeln!(
        card,
        "            <div class=\"note-date\">{}</div>",
        format_long_date(note.date)
    );
    let _ = writeln!(
        card,
        "            <div class=\"note-path\">{}</div>",
        html_escape(&note.relative_path(root).display().to_string())
    );
    card.push_str("        </div>\n");
    let _ = writeln!(
        card,
        "        <div class=\"note-content\">{}</div>",
        html_escape(&note.body)
    );
    card.push_str("    </div>\n");

    card
}
