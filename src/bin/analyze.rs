use idealfit::{dataset, sink, Analysis};

fn fail(error: &dyn std::fmt::Display) -> ! {
    eprintln!("{error}");
    std::process::exit(1);
}

fn main() {
    //
    // Three positional arguments: training, ideal, and test CSV paths.
    let mut args = std::env::args().skip(1);
    let (Some(train_path), Some(ideal_path), Some(test_path)) =
        (args.next(), args.next(), args.next())
    else {
        eprintln!(
            "Usage: analyze <train.csv> <ideal.csv> <test.csv> [out=<results.json>] [tables=<dir>] [plot=<chart.png>]"
        );
        std::process::exit(1);
    };

    let mut out_path = None;
    let mut tables_dir = None;
    let mut plot_path = None;
    for arg in args {
        if let Some(option) = arg.strip_prefix("out=") {
            out_path = Some(option.to_string());
        } else if let Some(option) = arg.strip_prefix("tables=") {
            tables_dir = Some(option.to_string());
        } else if let Some(option) = arg.strip_prefix("plot=") {
            plot_path = Some(option.to_string());
        } else {
            eprintln!("Unknown option: {arg}");
            std::process::exit(1);
        }
    }

    //
    // Load everything up front; schema problems fail before any computation.
    let references = dataset::load_function_table(&train_path, "train")
        .unwrap_or_else(|e| fail(&e));
    let candidates = dataset::load_function_table(&ideal_path, "ideal")
        .map(dataset::into_candidates)
        .unwrap_or_else(|e| fail(&e));
    let points = dataset::load_point_table(&test_path).unwrap_or_else(|e| fail(&e));

    println!(
        "Loaded {} training function(s), {} candidate(s), {} test point(s)",
        references.len(),
        candidates.len(),
        points.len()
    );

    //
    // Phase 1: matching
    let mut analysis = Analysis::new(references, candidates);
    analysis.run_matching().unwrap_or_else(|e| fail(&e));
    let summary = analysis.summary().unwrap_or_else(|e| fail(&e));
    print!("{summary}");

    //
    // Phase 2: assignment
    let records = analysis.assign(&points).unwrap_or_else(|e| fail(&e));
    let assigned = records.iter().filter(|r| r.is_assigned()).count();
    println!("Assigned {assigned} out of {} test point(s)", records.len());

    if let Some(out_path) = out_path {
        let results = analysis
            .match_results()
            .unwrap_or_else(|| fail(&"matching produced no results"));
        sink::write_match_report(&out_path, results, &records).unwrap_or_else(|e| fail(&e));
        println!("Wrote results to {out_path}");
    }

    if let Some(tables_dir) = tables_dir {
        sink::write_analysis_tables(&tables_dir, &analysis, &records).unwrap_or_else(|e| fail(&e));
        println!("Wrote result tables to {tables_dir}");
    }

    if let Some(plot_path) = plot_path {
        #[cfg(feature = "plotting")]
        {
            idealfit::plot::render_analysis(&plot_path, &analysis, &records)
                .unwrap_or_else(|e| fail(&e));
            println!("Wrote chart to {plot_path}");
        }

        #[cfg(not(feature = "plotting"))]
        {
            eprintln!("Cannot write {plot_path}: rebuild with the `plotting` feature");
            std::process::exit(1);
        }
    }
}
