/// Timestamped console line, in the spirit of tracing's `info!`.
///
/// - `info_time!("fmt", args..)` prints to stdout.
/// - `info_time!(start, "fmt", args..)` also reports the seconds elapsed since `start`.
/// - `info_time!(warn: "fmt", args..)` prints to stderr, for failures that get absorbed.
/// ```ignore
/// info_time!("getting term {term}");
/// let start = chrono::Local::now();
/// info_time!(start, "Finished {} courses", n);
/// info_time!(warn: "sections for {course_id} unavailable: {err}");
/// ```
#[macro_export]
macro_rules! info_time {
    (warn: $strfm:literal $(,)? $($arg:expr),*) => {{
        eprintln!("{:<30} : WARN {}", ::chrono::Local::now(), format!($strfm, $($arg),*));
    }};
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        println!("{:<30} : {}", ::chrono::Local::now(), format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = ::chrono::Local::now();
        let run_time = (local_now - $time)
            .num_milliseconds() as f64
            / 1_000.0;
        println!(
            "{:<30} : {} (took {:.3} sec)",
            local_now,
            format!($strfm, $($arg),*),
            run_time
        );
    }};
}
