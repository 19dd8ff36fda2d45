use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};
use serde::Serialize;

use alnq_core::models::GroundedAlignment;
use alnq_grounding::ground_alignment;
use alnq_io::{
    InputFormat, companion_var_path, read_core_alignment, read_fasta, read_final_core,
    read_gold_dir, read_gold_json, read_multi_var,
};
use alnq_scoring::{
    ExtendedGold, ExtendedMode, ExtendedReport, GoldLookup, MultiGold, PairwiseGold,
    ScoreReport, ScoringConfig, ScoringContext, calc_scores, calc_scores_extended,
    extended_text_report, text_report,
};

use super::cli::{GOLD_DIR, GOLD_JSON, GOLD_MULTI};

///
/// Inputs shared by every scoring mode.
///
struct TestInputs {
    test_aln: PathBuf,
    format: Option<InputFormat>,
    final_core: Option<PathBuf>,
}

impl TestInputs {
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let test_aln = matches
            .get_one::<String>("test_aln")
            .context("A path to the test alignment is required.")?;
        let format = matches
            .get_one::<String>("input-format")
            .map(|f| f.parse::<InputFormat>())
            .transpose()?;

        Ok(TestInputs {
            test_aln: PathBuf::from(test_aln),
            format,
            final_core: matches.get_one::<String>("final-core").map(PathBuf::from),
        })
    }

    ///
    /// Read and ground the test alignment, keeping the gold standard identifiers only.
    ///
    fn ground(
        &self,
        gold_ids: &HashSet<String>,
        full: &BTreeMap<String, String>,
    ) -> Result<GroundedAlignment> {
        if gold_ids.is_empty() {
            anyhow::bail!("No gold standard alignments were found");
        }
        debug!("Sequences in the gold alignment: {:?}", gold_ids);

        let records = read_core_alignment(&self.test_aln, self.format, Some(gold_ids))?;
        let shared = records
            .seqs
            .keys()
            .filter(|id| gold_ids.contains(*id))
            .count();
        if shared < 2 {
            anyhow::bail!(
                "Less than 2 sequences present in the test and gold alignment ({} found)",
                shared
            );
        }

        let known_cores = self.final_core.as_deref().map(read_final_core).transpose()?;
        let grounded =
            ground_alignment(&records.seqs, full, Some(gold_ids), known_cores.as_deref())?;
        Ok(grounded)
    }
}

fn write_report<T: Serialize>(output: &Path, text: &str, report: &T, json: bool) -> Result<()> {
    fs::write(output, text)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;
    info!("Created the output file: {}", output.display());

    if json {
        let json_path = PathBuf::from(format!("{}.json", output.display()));
        let file = fs::File::create(&json_path)
            .with_context(|| format!("Failed to create output file: {}", json_path.display()))?;
        serde_json::to_writer(file, report)?;
        info!("Created the output file: {}", json_path.display());
    }
    Ok(())
}

fn run_simple<G: GoldLookup>(
    gold: &G,
    full: &BTreeMap<String, String>,
    inputs: &TestInputs,
    output: &Path,
    json: bool,
) -> Result<()> {
    info!("'SIMPLE' score calculation");
    let gold_ids: HashSet<String> = gold.ids().into_iter().collect();
    let grounded = inputs.ground(&gold_ids, full)?;

    let summary = calc_scores(gold, &grounded);
    let report = ScoreReport::from(&summary);
    write_report(output, &text_report(&report), &report, json)
}

fn run_extended(
    gold_path: &Path,
    config: ScoringConfig,
    lenient: bool,
    full_path: Option<&Path>,
    inputs: &TestInputs,
    output: &Path,
    json: bool,
) -> Result<()> {
    info!("'EXTENDED' score calculation");
    let gold_json = read_gold_json(gold_path)?;

    let full = match full_path {
        Some(path) => read_fasta(path, None)?.into_map(),
        None => {
            let var_path = companion_var_path(gold_path);
            read_multi_var(&var_path)
                .with_context(|| {
                    format!(
                        "Full sequences of the gold standard not found; pass --full or provide {}",
                        var_path.display()
                    )
                })?
                .full
        }
    };

    // file modifiers override the defaults, the user's config overrides both
    let mode = match (lenient, config.mode) {
        (true, _) => ExtendedMode::Lenient,
        (false, mode) => mode.unwrap_or_default(),
    };
    let mut ctx = ScoringContext::new(mode).with_modifiers(&gold_json.score_modifiers);
    if let Some(weights) = &config.weights {
        ctx = ctx.with_modifiers(weights);
    }

    let gold = ExtendedGold::from_json(gold_json, full, &ctx)?;
    let target_len = gold
        .full
        .get(&gold.target)
        .map(String::len)
        .with_context(|| format!("No full sequence for the target {}", gold.target))?;

    let gold_ids: HashSet<String> = gold.ids().into_iter().collect();
    let grounded = inputs.ground(&gold_ids, &gold.full)?;

    let result = calc_scores_extended(&gold, &grounded, &ctx)?;
    let report = ExtendedReport::new(&result, &gold.target, target_len)?;
    write_report(output, &extended_text_report(&report), &report, json)
}

pub fn run_score(matches: &ArgMatches) -> Result<()> {
    let output = matches
        .get_one::<String>("output")
        .context("A path to the output file is required.")?;
    let output = Path::new(output);
    let json = matches.get_flag("json");
    let inputs = TestInputs::from_matches(matches)?;

    let config = match matches.get_one::<String>("config") {
        Some(path) => ScoringConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read the config file {}", path))?,
        None => ScoringConfig::default(),
    };

    if let Some(dir) = matches.get_one::<String>(GOLD_DIR) {
        let gold = PairwiseGold::from(read_gold_dir(Path::new(dir))?);
        run_simple(&gold, &gold.full, &inputs, output, json)
    } else if let Some(path) = matches.get_one::<String>(GOLD_MULTI) {
        let gold = MultiGold::from(read_multi_var(Path::new(path))?);
        run_simple(&gold, &gold.full, &inputs, output, json)
    } else if let Some(path) = matches.get_one::<String>(GOLD_JSON) {
        run_extended(
            Path::new(path),
            config,
            matches.get_flag("lenient"),
            matches.get_one::<String>("full").map(Path::new),
            &inputs,
            output,
            json,
        )
    } else {
        anyhow::bail!("One of --{}, --{} or --{} is required", GOLD_DIR, GOLD_MULTI, GOLD_JSON)
    }
}
