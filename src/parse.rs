use scraper::{ElementRef, Html, Selector};

use crate::model::{Course, Department, Section, Term};
use crate::store::is_path_segment;
use crate::{info_time, Error, Result};

/// Returns the text of the first descendant of `node` matching `selector`, with every
/// run of whitespace collapsed to a single space and the ends trimmed.
/// An empty string when nothing matches.
pub fn extract(node: ElementRef<'_>, selector: &Selector) -> String {
    node.select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// `"  Introduction to\n   programming. "` -> `"Introduction to programming."`
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads the term selector on the landing page.
/// With `active_only` only the `selected` option(s) are returned, otherwise all of them.
pub fn parse_terms(html: &str, active_only: bool) -> Result<Vec<Term>> {
    let doc = Html::parse_document(html);
    let option_selector = create_selector("#term-id-input option")?;

    let terms = doc
        .select(&option_selector)
        .filter(|option| !active_only || option.value().attr("selected").is_some())
        .filter_map(|option| option.value().attr("value"))
        .map(|value| value.trim().to_string())
        .filter(|value| is_path_segment(value))
        .collect();
    Ok(terms)
}

/// Reads the department prefix blocks on the landing page.
pub fn parse_departments(html: &str) -> Result<Vec<Department>> {
    let doc = Html::parse_document(html);
    let prefix_selector = create_selector(".course-prefix")?;
    let abbrev_selector = create_selector(".prefix-abbrev")?;
    let name_selector = create_selector(".prefix-name")?;

    let mut departments = Vec::new();
    for prefix in doc.select(&prefix_selector) {
        let id = extract(prefix, &abbrev_selector);
        if !is_path_segment(&id) {
            info_time!(warn: "skipping department block with abbreviation {id:?}");
            continue;
        }
        departments.push(Department {
            id,
            name: extract(prefix, &name_selector),
        });
    }
    Ok(departments)
}

/// Splits a department listing into the outer HTML of each `.course` block,
/// so the blocks can be parsed one at a time later on.
pub fn course_fragments(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let course_selector = create_selector(".course")?;
    Ok(doc.select(&course_selector).map(|div| div.html()).collect())
}

/// Builds a course from one `.course` block. `sections` is left empty.
pub fn parse_course(fragment: &str, term: &str, department: &Department) -> Result<Course> {
    let div = Html::parse_fragment(fragment);
    let root = div.root_element();

    let id = extract(root, &create_selector(".course-id")?);
    let title = extract(root, &create_selector(".course-title")?);
    let credits = extract(root, &create_selector(".course-min-credits")?);

    let approved = extract(root, &create_selector(".approved-course-text")?);
    let description = if approved.is_empty() {
        extract(root, &create_selector(".course-text")?)
    } else {
        approved
    };

    let grading = extract(root, &create_selector(".grading-method")?);

    Ok(Course {
        id,
        title,
        credits,
        description,
        grading_method: split_grading_method(&grading),
        sections: Vec::new(),
        term: term.to_string(),
        department: department.name.clone(),
    })
}

/// `"Regular, Pass-Fail, Audit"` -> `["Regular", "Pass-Fail", "Audit"]`.
pub fn split_grading_method(text: &str) -> Vec<String> {
    text.split(", ").map(str::to_string).collect()
}

/// Reads every `.section` block of a sections page, in page order.
pub fn parse_sections(html: &str) -> Result<Vec<Section>> {
    let doc = Html::parse_document(html);
    let section_selector = create_selector(".section")?;

    let id = create_selector(".section-id")?;
    let instructor = create_selector(".section-instructor")?;
    let seats = create_selector(".total-seats-count")?;
    let open_seats = create_selector(".open-seats-count")?;
    let waitlist = create_selector(".waitlist-count")?;
    let days = create_selector(".section-days")?;
    let start = create_selector(".class-start-time")?;
    let end = create_selector(".class-end-time")?;
    let building = create_selector(".building-code")?;
    let room = create_selector(".class-room")?;

    let sections = doc
        .select(&section_selector)
        .map(|div| Section {
            id: extract(div, &id),
            instructor: extract(div, &instructor),
            seats: extract(div, &seats),
            open_seats: extract(div, &open_seats),
            waitlist: extract(div, &waitlist),
            days: extract(div, &days),
            // Rendered as " - 10:00am" on the page.
            start: extract(div, &start)
                .trim_start_matches([' ', '-'])
                .to_string(),
            end: extract(div, &end),
            building: extract(div, &building),
            room: extract(div, &room),
        })
        .collect();
    Ok(sections)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::InvalidSelector(sel_str.into()))
}
