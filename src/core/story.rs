//! The compiled-in story: eight scenes following a shirt from one wear to
//! the sea, and the sources behind every number.

use super::catalog::{
    CameraPose, HorizontalAnchor, Scene, ScrollRange, Source, StatCard, StatsPlacement,
    VerticalAnchor, Visual,
};

/// Canonical citation numbering.  Changing this order renumbers every
/// `[n]` marker, so append only.
pub const CITATION_ORDER: &[&str] = &[
    "S_UNEP_2025_PR",
    "S_UNEP_2025_PR_2000_2015",
    "S_UNEP_2025_STORY_TRUCK",
    "S_EMF_TEXTILES_REPORT_TRUCK",
    "S_EMF_TEXTILES_REPORT_RECYCLE",
    "S_EMF_TEXTILES_REPORT_87",
    "S_EMF_FASHION_OVERVIEW_TRUCK",
    "S_TE_MMR_2023_POLY",
    "S_TE_MMR_2023_PER_CAPITA",
    "S_IUCN_2017_MICRO",
    "S_JAMBECK_2015_OCEAN",
    "S_UNEP_2021_METHANE",
    "S_MCKINSEY_GFA_2020_FOC",
    "S_WRAP_2024_LIFETIME",
];

const UNEP_ZERO_WASTE_TITLE: &str =
    "Unsustainable fashion and textiles in focus for International Day of Zero Waste 2025";
const UNEP_ZERO_WASTE_URL: &str = "https://www.unep.org/news-and-stories/press-release/unsustainable-fashion-and-textiles-focus-international-day-zero";
const EMF_REPORT_TITLE: &str = "A New Textiles Economy: Redesigning fashion's future (PDF)";
const EMF_REPORT_URL: &str = "https://content.ellenmacarthurfoundation.org/m/6d5071bb8a5f05a2/original/A-New-Textiles-Economy-Redesigning-fashions-future.pdf";
const TE_MMR_TITLE: &str = "Materials Market Report 2023 (key takeaways page)";
const TE_MMR_URL: &str =
    "https://textileexchange.org/knowledge-center/reports/materials-market-report-2023/";

fn source(id: &str, org: &str, title: &str, year: &str, url: &str, quote: &str) -> Source {
    Source {
        id: id.to_string(),
        org: org.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        url: url.to_string(),
        quote: quote.to_string(),
        note: None,
    }
}

pub fn sources() -> Vec<Source> {
    vec![
        source(
            "S_UNEP_2025_PR",
            "UNEP",
            UNEP_ZERO_WASTE_TITLE,
            "2025",
            UNEP_ZERO_WASTE_URL,
            "Every year, 92 million tonnes of textile waste is produced globally.",
        ),
        source(
            "S_UNEP_2025_PR_2000_2015",
            "UNEP",
            UNEP_ZERO_WASTE_TITLE,
            "2025",
            UNEP_ZERO_WASTE_URL,
            "Production doubled from 2000 to 2015… garment use decreased by 36 per cent.",
        ),
        source(
            "S_UNEP_2025_STORY_TRUCK",
            "UNEP",
            "Zero Waste Day shines a light on fashion and textiles",
            "2025",
            "https://www.unep.org/news-and-stories/story/zero-waste-day-shines-light-fashion-and-textiles",
            "Each second the equivalent of a garbage truck full of clothing is… dumped in a landfill.",
        ),
        source(
            "S_EMF_TEXTILES_REPORT_TRUCK",
            "Ellen MacArthur Foundation",
            EMF_REPORT_TITLE,
            "2017",
            EMF_REPORT_URL,
            "Overall, one garbage truck of textiles is landfilled or incinerated every second.",
        ),
        source(
            "S_EMF_TEXTILES_REPORT_RECYCLE",
            "Ellen MacArthur Foundation",
            EMF_REPORT_TITLE,
            "2017",
            EMF_REPORT_URL,
            "Less than 1% of material used to produce clothing is recycled into new clothing.",
        ),
        source(
            "S_EMF_TEXTILES_REPORT_87",
            "Ellen MacArthur Foundation",
            EMF_REPORT_TITLE,
            "2017",
            EMF_REPORT_URL,
            "Of the total fibre input used for clothing, 87% is landfilled or incinerated.",
        ),
        source(
            "S_EMF_FASHION_OVERVIEW_TRUCK",
            "Ellen MacArthur Foundation",
            "Circular Economy for the Fashion Industry (overview)",
            "undated",
            "https://www.ellenmacarthurfoundation.org/topics/fashion/overview",
            "Every second… a rubbish truckload of clothes is burnt or buried in landfill.",
        ),
        source(
            "S_TE_MMR_2023_POLY",
            "Textile Exchange",
            TE_MMR_TITLE,
            "2023",
            TE_MMR_URL,
            "Polyester… making up 54% of the global market in 2022.",
        ),
        source(
            "S_TE_MMR_2023_PER_CAPITA",
            "Textile Exchange",
            TE_MMR_TITLE,
            "2023",
            TE_MMR_URL,
            "Global fiber production… increased… to 14.6 kilograms per person in 2022.",
        ),
        Source {
            note: Some(
                "This 34.8% is for primary microplastics releases to oceans in the report's central scenario."
                    .to_string(),
            ),
            ..source(
                "S_IUCN_2017_MICRO",
                "IUCN",
                "Primary Microplastics in the Oceans (PDF)",
                "2017",
                "https://portals.iucn.org/library/sites/library/files/documents/2017-002-En.pdf",
                "Close to two-thirds (63.1%)… first the laundry of synthetic textiles (34.8%).",
            )
        },
        source(
            "S_JAMBECK_2015_OCEAN",
            "Science (Jambeck et al.)",
            "Plastic waste inputs from land into the ocean",
            "2015",
            "https://www.science.org/doi/10.1126/science.1260352",
            "4.8 to 12.7 million MT entering the ocean.",
        ),
        source(
            "S_UNEP_2021_METHANE",
            "UNEP",
            "Global Assessment: Urgent steps must be taken to reduce methane",
            "2021",
            "https://www.unep.org/news-and-stories/press-release/global-assessment-urgent-steps-must-be-taken-reduce-methane",
            "In the waste sector, landfills and wastewater make up about 20 per cent of emissions.",
        ),
        source(
            "S_MCKINSEY_GFA_2020_FOC",
            "McKinsey & Global Fashion Agenda",
            "Fashion on Climate (PDF)",
            "2020",
            "https://www.mckinsey.com/~/media/mckinsey/industries/retail/our%20insights/fashion%20on%20climate/fashion-on-climate-full-report.pdf",
            "2.1 billion tonnes of GHG emissions in 2018, equalling 4% of the global total.",
        ),
        source(
            "S_WRAP_2024_LIFETIME",
            "WRAP",
            "Extending Product Lifetimes: WRAP's Work on Clothing Durability",
            "2024",
            "https://www.wrap.ngo/resources/case-study/extending-product-lifetimes-wraps-work-clothing-durability",
            "Extending… by just nine months could reduce… footprints by up to 20%.",
        ),
    ]
}

fn card(id: &str, text: &str, source_ids: &[&str]) -> StatCard {
    StatCard {
        id: id.to_string(),
        text: text.to_string(),
        source_ids: source_ids.iter().map(|s| s.to_string()).collect(),
    }
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|l| l.to_string()).collect()
}

fn top_center(offset_y: f64) -> Option<StatsPlacement> {
    Some(StatsPlacement {
        vertical: VerticalAnchor::Top,
        horizontal: HorizontalAnchor::Center,
        offset_x: 0.0,
        offset_y,
    })
}

pub fn scenes() -> Vec<Scene> {
    let camera = CameraPose::default();
    vec![
        Scene {
            id: "SC_00".into(),
            chapter: "ONE WEAR".into(),
            headline: "A shirt. One wear. A bin.".into(),
            narration_lines: lines(&[
                "The story begins with a single shirt—bought fast, worn once, discarded quickly.",
                "The end looks small: a closed lid, a quiet curb.",
                "The scale is not small.",
            ]),
            stat_cards: vec![
                card(
                    "stat_00_1",
                    "Every year, 92 million tonnes of textile waste is produced globally.",
                    &["S_UNEP_2025_PR"],
                ),
                card(
                    "stat_00_2",
                    "Production doubled from 2000 to 2015… garment use decreased by 36%.",
                    &["S_UNEP_2025_PR_2000_2015"],
                ),
            ],
            range: ScrollRange::new(0.0, 0.09),
            camera,
            visual: Visual::new("shirtToBin")
                .model("/models/shirt.stl")
                .rotation([-1.57, 0.0, 0.0]),
            stats_placement: top_center(-10.0),
        },
        Scene {
            id: "SC_01".into(),
            chapter: "COLLECTION".into(),
            headline: "Compacted into the stream".into(),
            narration_lines: lines(&[
                "Discarded clothing enters the waste stream.",
                "A personal decision becomes industrial throughput.",
            ]),
            stat_cards: vec![card(
                "stat_01_1",
                "Each second the equivalent of a garbage truck full of clothing is… dumped in a landfill.",
                &["S_UNEP_2025_STORY_TRUCK"],
            )],
            range: ScrollRange::new(0.09, 0.18),
            camera,
            visual: Visual::new("binToTruck")
                .model("/models/bin.stl")
                .rotation([-1.4, 0.0, 0.5]),
            stats_placement: None,
        },
        Scene {
            id: "SC_02".into(),
            chapter: "LANDFILL".into(),
            headline: "\"Away\" is a place".into(),
            narration_lines: lines(&[
                "At the landfill, fabric becomes terrain.",
                "Time passes. The pile remains.",
                "This is where fast turns into long.",
            ]),
            stat_cards: vec![
                card(
                    "stat_02_1",
                    "Of the total fibre input used for clothing, 87% is landfilled or incinerated.",
                    &["S_EMF_TEXTILES_REPORT_87"],
                ),
                card(
                    "stat_02_2",
                    "Overall, one garbage truck of textiles is landfilled or incinerated every second.",
                    &["S_EMF_TEXTILES_REPORT_TRUCK"],
                ),
            ],
            range: ScrollRange::new(0.18, 0.28),
            camera,
            visual: Visual::new("landfillZoom")
                .model("/models/landfill.stl")
                .rotation([-1.3, 0.0, 0.5])
                .amplitude([0.05, 0.05, 0.0])
                .scale(2.0),
            stats_placement: None,
        },
        Scene {
            id: "SC_03".into(),
            chapter: "RECYCLING".into(),
            headline: "A loop that barely closes".into(),
            narration_lines: lines(&[
                "Most clothing is not remade into clothing.",
                "Material value leaks out of the system.",
            ]),
            stat_cards: vec![card(
                "stat_03_1",
                "Less than 1% of material used to produce clothing is recycled into new clothing.",
                &["S_EMF_TEXTILES_REPORT_RECYCLE"],
            )],
            range: ScrollRange::new(0.28, 0.38),
            camera,
            visual: Visual::new("labelsAndThreads").amplitude([0.05, 0.05, 0.0]),
            stats_placement: None,
        },
        Scene {
            id: "SC_04".into(),
            chapter: "MATERIALS".into(),
            headline: "The closet begins at extraction".into(),
            narration_lines: lines(&[
                "Zoom out far enough and the shirt turns back into its inputs.",
                "More fiber per person. More synthetic share.",
            ]),
            stat_cards: vec![
                card(
                    "stat_04_1",
                    "Global fiber production… increased… to 14.6 kilograms per person in 2022.",
                    &["S_TE_MMR_2023_PER_CAPITA"],
                ),
                card(
                    "stat_04_2",
                    "Polyester… making up 54% of the global market in 2022.",
                    &["S_TE_MMR_2023_POLY"],
                ),
            ],
            range: ScrollRange::new(0.38, 0.48),
            camera,
            visual: Visual::new("fibersToPolymers")
                .model("/models/fiber.stl")
                .rotation([-1.54, 0.0, 0.3]),
            stats_placement: top_center(-10.0),
        },
        Scene {
            id: "SC_05".into(),
            chapter: "MICROFIBERS".into(),
            headline: "Pollution that slips through".into(),
            narration_lines: lines(&[
                "Synthetic fabrics shed fibers during laundry.",
                "Those fibers move through wastewater pathways toward rivers and coasts.",
            ]),
            stat_cards: vec![card(
                "stat_05_1",
                "Close to two-thirds (63.1%)… first the laundry of synthetic textiles (34.8%).",
                &["S_IUCN_2017_MICRO"],
            )],
            range: ScrollRange::new(0.48, 0.58),
            camera,
            visual: Visual::new("washParticles"),
            stats_placement: None,
        },
        Scene {
            id: "SC_06".into(),
            chapter: "OCEAN".into(),
            headline: "From a seam to the sea".into(),
            narration_lines: lines(&[
                "Rivers connect closets to coastlines.",
                "Micro becomes widespread; widespread becomes hard to reverse.",
            ]),
            stat_cards: vec![card(
                "stat_06_1",
                "4.8 to 12.7 million MT entering the ocean.",
                &["S_JAMBECK_2015_OCEAN"],
            )],
            range: ScrollRange::new(0.58, 0.78),
            camera,
            visual: Visual::new("riverToGyre")
                .model("/models/ocean.stl")
                .rotation([-1.4, 0.0, 0.0])
                .amplitude([0.05, 0.0, 0.0])
                .scale(10.0),
            stats_placement: None,
        },
        Scene {
            id: "SC_07".into(),
            chapter: "CHANGE".into(),
            headline: "A longer life changes the math".into(),
            narration_lines: lines(&[
                "A smaller wardrobe can still contain enough.",
                "Keeping clothing in active use longer reduces new production pressure.",
            ]),
            stat_cards: vec![card(
                "stat_09_1",
                "Extending… by just nine months could reduce… footprints by up to 20%.",
                &["S_WRAP_2024_LIFETIME"],
            )],
            range: ScrollRange::new(0.78, 0.99),
            camera,
            visual: Visual::new("repairAndReuse"),
            stats_placement: top_center(30.0),
        },
    ]
}
