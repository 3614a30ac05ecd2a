use std::env;
use std::path::PathBuf;

use tabeval_eval::{EvaluateOptions, EvaluationEngine, render_report};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut ai_path: Option<PathBuf> = None;
    let mut truth_path: Option<PathBuf> = None;
    let mut metrics_out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--metrics-out" => metrics_out = args.next().map(PathBuf::from),
            _ => {
                if ai_path.is_none() {
                    ai_path = Some(PathBuf::from(arg));
                } else if truth_path.is_none() {
                    truth_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let ai_path = ai_path.ok_or("missing AI table path")?;
    let truth_path = truth_path.ok_or("missing ground truth path")?;

    let options = EvaluateOptions {
        metrics_out,
        ..EvaluateOptions::default()
    };
    let engine = EvaluationEngine::new(options);
    let result = engine.run(&ai_path, &truth_path)?;

    println!("{}", render_report(&result, engine.options().decimals));
    for entry in &result.column_metrics {
        for class in &entry.scores.classes {
            println!(
                "{}: label={:?} tp={} fp={} fn={} support={}",
                entry.column,
                class.label,
                class.true_positives,
                class.false_positives,
                class.false_negatives,
                class.support
            );
        }
    }
    Ok(())
}
