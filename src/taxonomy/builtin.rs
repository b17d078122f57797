//! Built-in longevity taxonomy.

use super::{MedicalConcept, Tier};

/// Returns the built-in concept table.
///
/// Primary concepts come first, then secondary, then interventions.
pub(super) fn concepts() -> Vec<MedicalConcept> {
    let mut concepts = primary();
    concepts.extend(secondary());
    concepts.extend(interventions());
    concepts
}

fn primary() -> Vec<MedicalConcept> {
    vec![
        MedicalConcept::new("aging", Tier::Primary, 1.0)
            .with_aliases(&[
                "aging",
                "ageing",
                "longevity",
                "lifespan",
                "healthspan",
                "life extension",
            ])
            .with_co_terms(&["mortality", "biomarker", "centenarian"]),
        MedicalConcept::new("cellular senescence", Tier::Primary, 0.9)
            .with_aliases(&[
                "senescence",
                "senescent cell",
                "senescent cells",
                "senescence-associated secretory phenotype",
                "SASP",
            ])
            .with_co_terms(&["p16", "p21", "cell cycle arrest"]),
        MedicalConcept::new("mitochondrial function", Tier::Primary, 0.9)
            .with_aliases(&[
                "mitochondria",
                "mitochondrial",
                "mitochondrion",
                "mitophagy",
                "oxidative phosphorylation",
            ])
            .with_co_terms(&["ATP", "electron transport chain", "biogenesis"]),
        MedicalConcept::new("nad metabolism", Tier::Primary, 0.9)
            .with_aliases(&[
                "NAD",
                "NAD+",
                "NADH",
                "nicotinamide adenine dinucleotide",
                "sirtuin",
                "sirtuins",
            ])
            .with_co_terms(&["CD38", "PARP", "salvage pathway"]),
        MedicalConcept::new("autophagy", Tier::Primary, 0.85)
            .with_aliases(&["autophagy", "autophagic", "lysosomal degradation"])
            .with_co_terms(&["lysosome", "TFEB"]),
        MedicalConcept::new("telomeres", Tier::Primary, 0.85)
            .with_aliases(&["telomere", "telomeres", "telomerase", "telomere attrition"])
            .with_co_terms(&["TERT", "replicative senescence"]),
        MedicalConcept::new("epigenetic clocks", Tier::Primary, 0.85)
            .with_aliases(&[
                "epigenetic clock",
                "epigenetic age",
                "DNA methylation",
                "Horvath clock",
                "biological age",
            ])
            .with_co_terms(&["CpG", "GrimAge", "reprogramming"]),
        MedicalConcept::new("proteostasis", Tier::Primary, 0.8)
            .with_aliases(&[
                "proteostasis",
                "protein aggregation",
                "misfolded proteins",
                "chaperone",
            ])
            .with_co_terms(&["heat shock", "proteasome"]),
    ]
}

fn secondary() -> Vec<MedicalConcept> {
    vec![
        MedicalConcept::new("inflammation", Tier::Secondary, 0.7)
            .with_aliases(&[
                "inflammation",
                "inflammaging",
                "inflammatory",
                "cytokines",
                "IL-6",
                "C-reactive protein",
            ])
            .with_co_terms(&["NF-kB", "TNF"]),
        MedicalConcept::new("oxidative stress", Tier::Secondary, 0.65)
            .with_aliases(&[
                "oxidative stress",
                "reactive oxygen species",
                "free radicals",
                "antioxidant",
                "antioxidants",
            ])
            .with_co_terms(&["glutathione", "superoxide"]),
        MedicalConcept::new("nutrient sensing", Tier::Secondary, 0.7)
            .with_aliases(&[
                "insulin resistance",
                "insulin sensitivity",
                "IGF-1",
                "mTOR signaling",
                "AMPK",
                "glucose metabolism",
            ])
            .with_co_terms(&["FOXO", "growth hormone axis"]),
        MedicalConcept::new("stem cell exhaustion", Tier::Secondary, 0.6)
            .with_aliases(&[
                "stem cell",
                "stem cells",
                "stem cell exhaustion",
                "tissue regeneration",
            ])
            .with_co_terms(&["niche", "hematopoietic"]),
        MedicalConcept::new("cardiovascular health", Tier::Secondary, 0.55)
            .with_aliases(&[
                "cardiovascular",
                "arterial stiffness",
                "atherosclerosis",
                "blood pressure",
            ])
            .with_co_terms(&["LDL", "endothelial"]),
        MedicalConcept::new("neurodegeneration", Tier::Secondary, 0.65)
            .with_aliases(&[
                "neurodegeneration",
                "neurodegenerative",
                "Alzheimer's",
                "dementia",
                "cognitive decline",
            ])
            .with_co_terms(&["amyloid", "tau"]),
        MedicalConcept::new("metabolic health", Tier::Secondary, 0.5)
            .with_aliases(&["metabolism", "metabolic syndrome", "obesity", "lipid profile"])
            .with_co_terms(&["HbA1c", "triglycerides"]),
        MedicalConcept::new("clinical evidence", Tier::Secondary, 0.6)
            .with_aliases(&[
                "clinical trial",
                "randomized controlled trial",
                "placebo",
                "cohort study",
                "meta-analysis",
            ])
            .with_co_terms(&["endpoint", "hazard ratio"]),
    ]
}

fn interventions() -> Vec<MedicalConcept> {
    vec![
        MedicalConcept::new("senolytics", Tier::Intervention, 0.85)
            .with_aliases(&["senolytic", "senolytics"])
            .with_examples(&["dasatinib", "quercetin", "fisetin", "navitoclax"])
            .with_co_terms(&["clearance", "apoptosis"]),
        MedicalConcept::new("caloric restriction", Tier::Intervention, 0.8)
            .with_aliases(&[
                "caloric restriction",
                "calorie restriction",
                "dietary restriction",
                "intermittent fasting",
                "time-restricted eating",
            ])
            .with_examples(&["fasting mimicking diet", "alternate-day fasting"])
            .with_co_terms(&["ketosis", "energy intake"]),
        MedicalConcept::new("rapamycin", Tier::Intervention, 0.85)
            .with_aliases(&[
                "rapamycin",
                "rapalog",
                "rapalogs",
                "mTOR inhibitor",
                "mTOR inhibitors",
            ])
            .with_examples(&["sirolimus", "everolimus"])
            .with_co_terms(&["immunosuppression", "mTORC1"]),
        MedicalConcept::new("metformin", Tier::Intervention, 0.75)
            .with_aliases(&["metformin", "biguanide"])
            .with_examples(&["Glucophage"])
            .with_co_terms(&["TAME trial", "diabetes"]),
        MedicalConcept::new("nad precursors", Tier::Intervention, 0.8)
            .with_aliases(&["NAD precursor", "NAD precursors", "NAD+ precursor", "NAD+ precursors"])
            .with_examples(&[
                "nicotinamide riboside",
                "nicotinamide mononucleotide",
                "NMN",
                "niacin",
            ])
            .with_co_terms(&["supplementation", "bioavailability"]),
        MedicalConcept::new("coenzyme q10", Tier::Intervention, 0.6)
            .with_aliases(&["coenzyme Q10", "CoQ10"])
            .with_examples(&["ubiquinol", "ubiquinone"])
            .with_co_terms(&["statin"]),
        MedicalConcept::new("exercise", Tier::Intervention, 0.6)
            .with_aliases(&[
                "exercise",
                "physical activity",
                "resistance training",
                "aerobic training",
            ])
            .with_examples(&["high-intensity interval training", "HIIT"])
            .with_co_terms(&["VO2 max", "sarcopenia"]),
        MedicalConcept::new("hormone therapy", Tier::Intervention, 0.55)
            .with_aliases(&["hormone replacement therapy", "HRT", "growth hormone"])
            .with_examples(&["DHEA", "testosterone replacement"])
            .with_co_terms(&["menopause", "estrogen"]),
    ]
}
