//! Built-in themes
//!
//! `default` is a complete theme; `grace` and `simple` are overrides layered
//! on top of it, so their rules come after the default rules and win ties.

use super::css::parse_stylesheet;
use super::StyleRule;

/// Names of the built-in themes.
pub const THEME_NAMES: &[&str] = &["default", "grace", "simple"];

const DEFAULT_CSS: &str = r#"
.container {
  font-family: var(--md-font-family);
  font-size: var(--md-font-size);
  line-height: 1.75;
  text-align: left;
  color: #3f3f3f;
}
h1 {
  display: table;
  padding: 0 1em;
  border-bottom: 2px solid var(--md-primary-color);
  margin: 2em auto 1em;
  color: #3f3f3f;
  font-size: 1.2em;
  font-weight: bold;
  text-align: center;
}
h2 {
  display: table;
  padding: 0 0.2em;
  margin: 4em auto 2em;
  color: #fff;
  background: var(--md-primary-color);
  font-size: 1.2em;
  font-weight: bold;
  text-align: center;
}
h3 {
  padding-left: 8px;
  border-left: 3px solid var(--md-primary-color);
  margin: 2em 8px 0.75em 0;
  color: #3f3f3f;
  font-size: 1.1em;
  font-weight: bold;
  line-height: 1.2;
}
h4 {
  margin: 2em 8px 0.5em;
  color: var(--md-primary-color);
  font-size: 1em;
  font-weight: bold;
}
h5, h6 {
  margin: 1.5em 8px 0.5em;
  color: var(--md-primary-color);
  font-size: 1em;
}
p {
  margin: 1.5em 8px;
  letter-spacing: 0.1em;
  color: #3f3f3f;
}
blockquote {
  font-style: normal;
  padding: 1em;
  border-left: 4px solid var(--md-primary-color);
  border-radius: 6px;
  color: rgba(0, 0, 0, 0.5);
  background: #f7f7f7;
  margin: 0 8px 1em;
}
blockquote p {
  display: block;
  font-size: 1em;
  letter-spacing: 0.1em;
  color: #3f3f3f;
  margin: 0;
}
pre.code__pre {
  font-size: 14px;
  overflow-x: auto;
  border-radius: 8px;
  padding: 0;
  line-height: 1.5;
  margin: 10px 8px;
}
pre.code__pre code {
  display: -webkit-box;
  padding: 0.5em 1em 1em;
  overflow-x: auto;
  text-indent: 0;
  color: inherit;
  background: none;
  white-space: nowrap;
  margin: 0;
}
.line-numbers {
  display: inline-block;
  padding: 0.5em 0.5em 1em 1em;
  text-align: right;
  opacity: 0.5;
  user-select: none;
}
code {
  font-size: 90%;
  color: #d14;
  background: rgba(27, 31, 35, 0.05);
  padding: 3px 5px;
  border-radius: 4px;
}
figure {
  margin: 1.5em 8px;
  color: #3f3f3f;
}
img {
  display: block;
  max-width: 100%;
  margin: 0.1em auto 0.5em;
  border-radius: 4px;
}
figcaption {
  text-align: center;
  color: #888;
  font-size: 0.8em;
}
ol {
  padding-left: 1em;
  margin-left: 0;
  color: #3f3f3f;
}
ul {
  list-style: circle;
  padding-left: 1em;
  margin-left: 0;
  color: #3f3f3f;
}
li {
  display: block;
  margin: 0.2em 8px;
  color: #3f3f3f;
}
hr {
  border-style: solid;
  border-width: 1px 0 0;
  border-color: rgba(0, 0, 0, 0.1);
  height: 0.4em;
  margin: 1.5em 0;
}
a {
  color: #576b95;
  text-decoration: none;
}
strong {
  color: var(--md-primary-color);
  font-weight: bold;
  font-size: inherit;
}
em {
  font-style: italic;
  font-size: inherit;
}
table {
  color: #3f3f3f;
  border-collapse: collapse;
}
th {
  border: 1px solid #dfdfdf;
  padding: 0.25em 0.5em;
  word-break: keep-all;
  background: rgba(0, 0, 0, 0.05);
}
td {
  border: 1px solid #dfdfdf;
  padding: 0.25em 0.5em;
  word-break: keep-all;
}
sup {
  line-height: 0;
  color: var(--md-primary-color);
}
.footnotes-title {
  margin: 2em 8px 0.5em;
  color: var(--md-primary-color);
  font-size: 1em;
}
.footnotes {
  margin: 0.5em 8px;
  font-size: 80%;
  color: #3f3f3f;
}
.reading-time {
  margin: 0 8px 1em;
  padding: 0.5em 1em;
  color: rgba(0, 0, 0, 0.5);
  background: #f7f7f7;
}
"#;

const GRACE_CSS: &str = r#"
h1 {
  padding: 0.5em 1em;
  border-bottom: 2px solid var(--md-primary-color);
  font-size: 1.4em;
  text-shadow: 2px 2px 4px rgba(0, 0, 0, 0.1);
}
h2 {
  padding: 0.3em 1em;
  border-radius: 8px;
  font-size: 1.3em;
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
}
h3 {
  padding-left: 12px;
  font-size: 1.2em;
  border-left: 4px solid var(--md-primary-color);
  border-bottom: 1px dashed var(--md-primary-color);
}
h4 {
  font-size: 1.1em;
}
blockquote {
  font-style: italic;
  padding: 1em 1em 1em 2em;
  border-left: 4px solid var(--md-primary-color);
  border-radius: 6px;
  color: rgba(0, 0, 0, 0.6);
  box-shadow: 0 4px 6px rgba(0, 0, 0, 0.05);
}
pre.code__pre {
  box-shadow: inset 0 0 10px rgba(0, 0, 0, 0.05);
}
code {
  color: var(--md-primary-color);
}
img {
  border-radius: 8px;
  box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
}
ol, ul {
  padding-left: 1.5em;
}
hr {
  height: 1px;
  border: none;
  margin: 2em 0;
  background: linear-gradient(to right, rgba(0, 0, 0, 0), rgba(0, 0, 0, 0.1), rgba(0, 0, 0, 0));
}
th {
  color: #fff;
  background: var(--md-primary-color);
}
"#;

const SIMPLE_CSS: &str = r#"
h1 {
  padding: 0.5em 1em;
  font-size: 1.4em;
  text-shadow: 1px 1px 3px rgba(0, 0, 0, 0.05);
}
h2 {
  padding: 0.3em 1.2em;
  font-size: 1.3em;
  border-radius: 8px 24px 8px 24px;
  box-shadow: 0 2px 6px rgba(0, 0, 0, 0.06);
}
h3 {
  padding-left: 12px;
  font-size: 1.2em;
  border-radius: 6px;
  line-height: 2.4em;
  border-left: 4px solid var(--md-primary-color);
  margin-right: 8px;
  background: rgba(0, 0, 0, 0.03);
}
blockquote {
  font-style: italic;
  padding: 1em 1em 1em 2em;
  color: rgba(0, 0, 0, 0.6);
  border: 1px solid rgba(0, 0, 0, 0.05);
  border-left: 4px solid var(--md-primary-color);
}
pre.code__pre {
  border: 1px solid rgba(0, 0, 0, 0.05);
}
img {
  border-radius: 8px;
  border: 1px solid rgba(0, 0, 0, 0.05);
}
hr {
  height: 1px;
  border: none;
  margin: 2em 0;
  background: linear-gradient(to right, rgba(0, 0, 0, 0), rgba(0, 0, 0, 0.1), rgba(0, 0, 0, 0));
}
"#;

/// Rules of a built-in theme, or `None` for an unknown name.
pub(super) fn theme_rules(name: &str) -> Option<Vec<StyleRule>> {
    let overrides = match name {
        "default" => "",
        "grace" => GRACE_CSS,
        "simple" => SIMPLE_CSS,
        _ => return None,
    };
    let mut rules = parse_stylesheet(DEFAULT_CSS);
    rules.extend(parse_stylesheet(overrides));
    Some(rules)
}
