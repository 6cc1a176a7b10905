//! Server-side rendering of the ranking page

use fdrk_common::DisplayRow;
use html_escape::encode_text;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Food Ranking</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
  table { border-collapse: collapse; width: 100%; }
  th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }
  th { background: #f3f3f3; }
  td.score { text-align: right; }
</style>
</head>
<body>
<h1>Food Ranking</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

const TABLE_HEAD: &str = concat!(
    "<table>\n<thead><tr>",
    "<th>Rank</th><th>Food Name</th><th>Composite Score</th>",
    "</tr></thead>\n<tbody>\n",
);

/// Full page with one table row per entry
pub fn render_rankings(rows: &[DisplayRow]) -> String {
    let mut html = String::from(PAGE_HEAD);
    html.push_str(TABLE_HEAD);
    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"score\">{:.2}</td></tr>\n",
            row.rank,
            encode_text(&row.food_name),
            row.composite_score
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(PAGE_TAIL);
    html
}

/// Page shown while no ranked table exists
pub fn render_empty(message: &str) -> String {
    format!(
        "{}<p class=\"empty\">No rankings yet. {}</p>\n{}",
        PAGE_HEAD,
        encode_text(message),
        PAGE_TAIL
    )
}
