use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use blend_content::resolve_catalog;
use blend_core::{
    blend_weights, calculate_wax_for_vessel, list_containers, validate_proportions, BlendEngine,
    BlendProportion, BlendSettings, Catalog, ComponentWeight, ContainerDef, ProductType,
    ScentComponent, WaxCalculation,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "blend_cli", about = "Fragrance blend and vessel calculator")]
struct Cli {
    /// Load the container catalog from this directory instead of the built-in table.
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split 100% across 1–4 scent components.
    Blend {
        /// Component as `id=name`. Repeat 1–4 times.
        #[arg(long = "component", required = true)]
        components: Vec<String>,
        /// Free-text preference such as "more leather, less citrus".
        #[arg(long)]
        hint: Option<String>,
        #[arg(long)]
        product_type: Option<String>,
    },
    /// Wax, fragrance oil and wick for one vessel.
    Wax {
        #[arg(long, conflicts_with = "capacity", required_unless_present = "capacity")]
        container: Option<String>,
        #[arg(long)]
        capacity: Option<f64>,
        /// Fragrance load in percent. Defaults to the product type's typical load, else 10.
        #[arg(long)]
        load: Option<f64>,
        #[arg(long)]
        product_type: Option<String>,
    },
    /// List catalog containers.
    Containers {
        /// Only containers with exactly this capacity in ounces.
        #[arg(long)]
        capacity: Option<f64>,
    },
    /// Grams per component for a batch of fragrance oil.
    Weights {
        /// Component as `id=name=percent`. Percents must sum to 100.
        #[arg(long = "component", required = true)]
        components: Vec<String>,
        #[arg(long)]
        batch_g: f64,
    },
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn parse_component(raw: &str) -> Result<ScentComponent> {
    let (id, name) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("component '{raw}' must look like id=name"))?;
    if id.trim().is_empty() || name.trim().is_empty() {
        bail!("component '{raw}' has an empty id or name");
    }
    Ok(ScentComponent::new(id.trim(), name.trim()))
}

fn parse_weighted_component(raw: &str) -> Result<BlendProportion> {
    let (rest, percent) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("component '{raw}' must look like id=name=percent"))?;
    let component = parse_component(rest)?;
    let proportion_percent: u32 = percent
        .trim()
        .parse()
        .with_context(|| format!("percent in component '{raw}'"))?;
    Ok(BlendProportion {
        id: component.id,
        name: component.name,
        proportion_percent,
    })
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run_blend(
    catalog: &Catalog,
    raw_components: &[String],
    hint: Option<&str>,
    product_type: Option<&str>,
    json: bool,
) -> Result<()> {
    let components = raw_components
        .iter()
        .map(|raw| parse_component(raw))
        .collect::<Result<Vec<_>>>()?;
    let engine = BlendEngine::with_settings(BlendSettings::from(catalog.constants()));
    let blend = engine.calculate(&components, hint, product_type)?;
    if json {
        return print_json(&blend);
    }
    for p in &blend {
        println!("{:<12} {:<24} {:>3}%", p.id.0, p.name, p.proportion_percent);
    }
    Ok(())
}

fn run_wax(
    catalog: &Catalog,
    container: Option<&str>,
    capacity: Option<f64>,
    load: Option<f64>,
    product_type: Option<&str>,
    json: bool,
) -> Result<()> {
    let load = load.or_else(|| {
        product_type.map(|raw| ProductType::from_hint(raw).typical_fragrance_load_percent())
    });
    let Some(result) = calculate_wax_for_vessel(catalog, container, capacity, load) else {
        match container {
            Some(id) => {
                bail!("container '{id}' not found; run `blend_cli containers` to see the catalog")
            }
            None => bail!("capacity must be a positive number of ounces"),
        }
    };
    if json {
        return print_json(&result);
    }
    print_wax(&result);
    Ok(())
}

fn print_wax(result: &WaxCalculation) {
    match (&result.container_id, &result.container_name) {
        (Some(id), Some(name)) => println!("Vessel:     {id} {name} ({} oz)", result.capacity_oz),
        _ => println!("Vessel:     {} oz", result.capacity_oz),
    }
    println!("Load:       {}%", result.fragrance_load_percent);
    println!("Total fill: {:.1} g", result.total_wax_weight_g);
    println!("Fragrance:  {:.1} g", result.fragrance_weight_g);
    println!("Wax:        {:.1} g", result.net_wax_weight_g);
    println!("Wick:       {}", result.recommended_wick);
}

fn run_containers(catalog: &Catalog, capacity: Option<f64>, json: bool) -> Result<()> {
    let containers = list_containers(catalog, capacity);
    if json {
        return print_json(&containers);
    }
    print_containers(&containers);
    Ok(())
}

fn print_containers(containers: &[ContainerDef]) {
    if containers.is_empty() {
        println!("No containers match.");
        return;
    }
    for c in containers {
        println!("{:<8} {:<24} {:>5} oz  {}", c.id.0, c.name, c.capacity_oz, c.material);
    }
}

fn run_weights(raw_components: &[String], batch_g: f64, json: bool) -> Result<()> {
    let blend = raw_components
        .iter()
        .map(|raw| parse_weighted_component(raw))
        .collect::<Result<Vec<_>>>()?;
    validate_proportions(&blend)?;
    let weights = blend_weights(&blend, batch_g);
    if json {
        return print_json(&weights);
    }
    print_weights(&weights);
    Ok(())
}

fn print_weights(weights: &[ComponentWeight]) {
    for w in weights {
        println!(
            "{:<12} {:<24} {:>3}%  {:>8.2} g",
            w.id.0, w.name, w.proportion_percent, w.weight_g
        );
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{out}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = resolve_catalog(cli.content_dir.as_deref())?;
    match cli.command {
        Commands::Blend {
            components,
            hint,
            product_type,
        } => run_blend(
            &catalog,
            &components,
            hint.as_deref(),
            product_type.as_deref(),
            cli.json,
        )?,
        Commands::Wax {
            container,
            capacity,
            load,
            product_type,
        } => run_wax(
            &catalog,
            container.as_deref(),
            capacity,
            load,
            product_type.as_deref(),
            cli.json,
        )?,
        Commands::Containers { capacity } => run_containers(&catalog, capacity, cli.json)?,
        Commands::Weights {
            components,
            batch_g,
        } => run_weights(&components, batch_g, cli.json)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blend_core::{calculate_blend_proportions, ComponentId};

    #[test]
    fn parse_component_splits_on_first_equals() {
        let component = parse_component("f1=Sea Salt").unwrap();
        assert_eq!(component.id, ComponentId::from("f1"));
        assert_eq!(component.name, "Sea Salt");
    }

    #[test]
    fn parse_component_rejects_missing_name() {
        assert!(parse_component("f1").is_err());
        assert!(parse_component("f1=  ").is_err());
    }

    #[test]
    fn parse_weighted_component_reads_percent() {
        let p = parse_weighted_component("f1=Leather=60").unwrap();
        assert_eq!(p.name, "Leather");
        assert_eq!(p.proportion_percent, 60);
        assert!(parse_weighted_component("f1=Leather=sixty").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn blend_args_round_trip_through_engine() {
        let cli = Cli::parse_from([
            "blend_cli",
            "blend",
            "--component",
            "l=Leather",
            "--component",
            "c=Citrus",
            "--hint",
            "more leather",
        ]);
        let Commands::Blend {
            components, hint, ..
        } = cli.command
        else {
            panic!("expected blend subcommand");
        };
        let parsed: Vec<ScentComponent> = components
            .iter()
            .map(|raw| parse_component(raw).unwrap())
            .collect();
        let blend = calculate_blend_proportions(&parsed, hint.as_deref(), None).unwrap();
        assert!(blend[0].proportion_percent > blend[1].proportion_percent);
    }

    #[test]
    fn wax_requires_container_or_capacity() {
        assert!(Cli::try_parse_from(["blend_cli", "wax"]).is_err());
        assert!(Cli::try_parse_from(["blend_cli", "wax", "--capacity", "8"]).is_ok());
        assert!(
            Cli::try_parse_from(["blend_cli", "wax", "--container", "c-003", "--capacity", "8"])
                .is_err()
        );
    }
}
