use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use reco_basis::core::math::logspace;
use reco_basis::{combine, BasisComponents, BasisEvaluator, EvaluatorConfig, SampleBatch};
use serde::Serialize;

/// JSON 출력 형식
#[derive(Serialize)]
struct EvaluationReport<'a> {
    k: Vec<f64>,
    spline_grid: Vec<f64>,
    components: &'a BasisComponents,
    total: Vec<f64>,
}

fn cli() -> Command {
    Command::new("reco_basis")
        .version("0.1.0")
        .about("재결합 소스 함수 기저 분해 평가 도구")
        .arg(
            Arg::new("k-min")
                .long("k-min")
                .value_name("K")
                .help("그리드 최소 파수")
                .default_value("1e-4"),
        )
        .arg(
            Arg::new("k-max")
                .long("k-max")
                .value_name("K")
                .help("그리드 최대 파수")
                .default_value("0.6"),
        )
        .arg(
            Arg::new("points")
                .long("points")
                .short('n')
                .value_name("N")
                .help("로그 간격 그리드 점 개수")
                .default_value("100"),
        )
        .arg(
            Arg::new("r-s")
                .long("r-s")
                .value_name("R")
                .help("전파 거리 r_s")
                .default_value("145.0"),
        )
        .arg(
            Arg::new("k-d")
                .long("k-d")
                .value_name("K")
                .help("감쇠 스케일 k_D")
                .default_value("0.3"),
        )
        .arg(
            Arg::new("delta-k-d")
                .long("delta-k-d")
                .value_name("D")
                .help("감쇠 스케일 보정")
                .default_value("0.0"),
        )
        .arg(
            Arg::new("phases")
                .long("phases")
                .value_name("P0,P1,P2,P3,P4")
                .help("위상 5개 (쉼표 구분)")
                .default_value("0,0,0,0,0"),
        )
        .arg(
            Arg::new("coefficients")
                .long("coefficients")
                .short('c')
                .value_name("C0,C1")
                .help("cos/sin 계수 (쉼표 구분)")
                .default_value("1,0"),
        )
        .arg(
            Arg::new("spline-value")
                .long("spline-value")
                .value_name("V")
                .help("모든 스플라인 제어점에 쓸 상수 값")
                .default_value("0.0"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("평가기 구성 JSON 파일"),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .action(ArgAction::SetTrue)
                .help("JSON 대신 요약 출력"),
        )
}

fn parse_f64(matches: &ArgMatches, name: &str) -> Result<f64> {
    let raw = matches
        .get_one::<String>(name)
        .with_context(|| format!("missing --{}", name))?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("--{} is not a number: {}", name, raw))
}

fn parse_list<const N: usize>(matches: &ArgMatches, name: &str) -> Result<[f64; N]> {
    let raw = matches
        .get_one::<String>(name)
        .with_context(|| format!("missing --{}", name))?;
    let values = raw
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("--{} contains a non-number: {}", name, v))
        })
        .collect::<Result<Vec<_>>>()?;
    if values.len() != N {
        bail!("--{} expects {} values, got {}", name, N, values.len());
    }
    let mut out = [0.0; N];
    out.copy_from_slice(&values);
    Ok(out)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => EvaluatorConfig::from_json_file(path)
            .with_context(|| format!("loading evaluator config from {}", path))?,
        None => EvaluatorConfig::default(),
    };

    let points = matches
        .get_one::<String>("points")
        .context("missing --points")?
        .parse::<usize>()
        .context("--points must be a positive integer")?;
    let k = logspace(parse_f64(matches, "k-min")?, parse_f64(matches, "k-max")?, points)
        .context("building wavenumber grid")?;

    let evaluator = BasisEvaluator::new(k, config).context("constructing basis evaluator")?;
    info!(
        "evaluator ready: {} grid points, {} spline points",
        evaluator.grid().len(),
        evaluator.n_spline_points()
    );

    let spline_values = vec![parse_f64(matches, "spline-value")?; evaluator.n_spline_points()];
    let batch = SampleBatch::single(
        parse_f64(matches, "r-s")?,
        parse_f64(matches, "k-d")?,
        parse_f64(matches, "delta-k-d")?,
        parse_list::<5>(matches, "phases")?,
        parse_list::<2>(matches, "coefficients")?,
        &spline_values,
    )?;

    let components = evaluator.evaluate(&batch).context("evaluating basis")?;
    let total = combine(&components, None)?;

    if matches.get_flag("summary") {
        println!("=== 기저 분해 요약 ===");
        println!("그리드: {} 점, 스플라인 열 {:?}", evaluator.grid().len(), evaluator.spline_columns());
        for (name, curve) in [
            ("cosine", &components.cosine),
            ("sine", &components.sine),
            ("spline", &components.spline),
        ] {
            let max = curve.iter().fold(0.0f64, |m, v| m.max(v.abs()));
            println!("  - {:<7} max |value| = {:.6e}", name, max);
        }
        let max_total = total.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        println!("  - total   max |value| = {:.6e}", max_total);
    } else {
        let report = EvaluationReport {
            k: evaluator.grid().to_vec(),
            spline_grid: evaluator.spline_grid().to_vec(),
            components: &components,
            total: total.iter().copied().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("오류: {:#}", e);
        std::process::exit(1);
    }
}
