//! Listing fragments cached on `|bibliography>` blocks.

use std::fmt::Write;

use super::entry::{BibEntry, Bibliography};
use crate::render::escape;

pub fn html_listing(bibliography: &Bibliography) -> String {
    let mut out = String::from("<div class=\"bibliography\">\n");
    for entry in bibliography.iter() {
        html_entry(&mut out, entry);
    }
    out.push_str("</div>\n");
    out
}

fn html_entry(out: &mut String, entry: &BibEntry) {
    let fields = &entry.fields;
    let _ = write!(
        out,
        "<div class=\"bib-entry\" id=\"ref-{index}\">\
         <div class=\"bib-entry-index-wrapper\"><div class=\"bib-entry-index\">[{index}]</div></div>\
         <div class=\"bib-entry-text-wrapper\"><div class=\"bib-entry-text\">",
        index = entry.index
    );
    if let Some(author) = &fields.author {
        let _ = write!(out, "<span class=\"author\">{}</span> - ", escape::html(author));
    }
    let title = fields.title.as_deref().unwrap_or(&entry.tag);
    let _ = write!(out, "<span class=\"title\">{}</span>", escape::html(title));
    let details = [
        ("journal", &fields.journal),
        ("volume", &fields.volume),
        ("number", &fields.number),
        ("pages", &fields.pages),
        ("publisher", &fields.publisher),
        ("year", &fields.year),
    ];
    for (class, value) in details {
        if let Some(value) = value {
            let _ = write!(out, ", <span class=\"{class}\">{}</span>", escape::html(value));
        }
    }
    if let Some(url) = &fields.url {
        let url = escape::attribute(url);
        let _ = write!(out, ", <a class=\"url\" href=\"{url}\">{url}</a>");
    }
    out.push_str("</div></div></div>\n");
}

pub fn latex_listing(bibliography: &Bibliography) -> String {
    if bibliography.is_empty() {
        return String::new();
    }
    let mut out = format!("\\begin{{thebibliography}}{{{}}}\n", bibliography.len());
    for entry in bibliography.iter() {
        let fields = &entry.fields;
        let _ = write!(out, "\\bibitem{{{}}} ", escape::latex(&entry.tag));
        if let Some(author) = &fields.author {
            let _ = write!(out, "{}. ", escape::latex(author));
        }
        let title = fields.title.as_deref().unwrap_or(&entry.tag);
        let _ = write!(out, "\\textit{{{}}}", escape::latex(title));
        for value in [
            &fields.journal,
            &fields.volume,
            &fields.number,
            &fields.pages,
            &fields.publisher,
            &fields.year,
        ]
        .into_iter()
        .flatten()
        {
            let _ = write!(out, ", {}", escape::latex(value));
        }
        if let Some(url) = &fields.url {
            let _ = write!(out, ", \\url{{{url}}}");
        }
        out.push('\n');
    }
    out.push_str("\\end{thebibliography}\n");
    out
}
