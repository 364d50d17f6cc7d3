use studyrest_core::{format_clock, Section, SectionList};

/// Print the study and rest seconds each minute value would produce.
pub fn run(minutes: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut rows = Vec::with_capacity(minutes.len());
    for raw in minutes {
        let value = SectionList::parse_entry(raw);
        let section = Section::derive(value)?;
        rows.push((value, section));
    }

    if json {
        let out: Vec<_> = rows
            .iter()
            .map(|(minutes, s)| {
                serde_json::json!({
                    "minutes": minutes,
                    "study_secs": s.study_secs,
                    "rest_secs": s.rest_secs,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (minutes, s) in rows {
            println!(
                "{minutes} min: study {} ({}s), rest {} ({}s)",
                format_clock(s.study_secs),
                s.study_secs,
                format_clock(s.rest_secs),
                s.rest_secs
            );
        }
    }
    Ok(())
}
