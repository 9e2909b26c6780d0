//! Fixed, representative investor batch for offline runs and demos.

use crate::types::{Category, InvestorRecord};
use chrono::{DateTime, TimeZone, Utc};

struct SampleFirm {
    identifier: &'static str,
    name: &'static str,
    category: Category,
    address: &'static str,
    aum_estimate: &'static str,
    investment_focus: &'static str,
    stage_preference: &'static str,
    sectors: &'static str,
    geography: &'static str,
    website: &'static str,
    contact_email: Option<&'static str>,
    notable_investments: &'static str,
    decision_makers: &'static str,
}

const SAMPLE_FIRMS: &[SampleFirm] = &[
    SampleFirm {
        identifier: "0001234567",
        name: "Rockefeller Capital Management",
        category: Category::FamilyOffice,
        address: "10 Rockefeller Plaza, New York, NY 10020",
        aum_estimate: "10B+",
        investment_focus: "Multi-strategy, Global Markets",
        stage_preference: "Growth, Late Stage",
        sectors: "Technology, Healthcare, Real Estate",
        geography: "Global",
        website: "rockco.com",
        contact_email: Some("info@rockco.com"),
        notable_investments: "Multiple tech unicorns",
        decision_makers: "Greg Fleming (CEO)",
    },
    SampleFirm {
        identifier: "0001234568",
        name: "Bessemer Trust Company",
        category: Category::FamilyOffice,
        address: "630 Fifth Avenue, New York, NY 10111",
        aum_estimate: "150B+",
        investment_focus: "Wealth Management, Private Investments",
        stage_preference: "Series A, Series B, Growth",
        sectors: "Fintech, AI/ML, Enterprise Software",
        geography: "North America, Europe",
        website: "bessemertrust.com",
        contact_email: Some("inquiries@bessemertrust.com"),
        notable_investments: "Multiple fintech startups",
        decision_makers: "Marc Stern (CIO)",
    },
    SampleFirm {
        identifier: "0001234569",
        name: "Iconiq Capital",
        category: Category::FamilyOffice,
        address: "394 Pacific Avenue, San Francisco, CA 94111",
        aum_estimate: "50B+",
        investment_focus: "Technology, Growth Equity",
        stage_preference: "Series B, Series C, Growth",
        sectors: "Consumer Tech, SaaS, AI, Fintech",
        geography: "Global, Silicon Valley Focus",
        website: "iconiqcapital.com",
        contact_email: Some("investments@iconiqcapital.com"),
        notable_investments: "Facebook, Twitter, Uber, Spotify",
        decision_makers: "Divesh Makan (Founder)",
    },
    SampleFirm {
        identifier: "0001234570",
        name: "Emerson Collective",
        category: Category::FamilyOffice,
        address: "Palo Alto, CA",
        aum_estimate: "15B+",
        investment_focus: "Social Impact, Technology",
        stage_preference: "Seed, Series A, Growth",
        sectors: "Education Tech, Climate, Immigration, Healthcare",
        geography: "United States",
        website: "emersoncollective.com",
        contact_email: Some("info@emersoncollective.com"),
        notable_investments: "Multiple education startups",
        decision_makers: "Laurene Powell Jobs (Founder)",
    },
    SampleFirm {
        identifier: "0001234571",
        name: "Andreessen Horowitz",
        category: Category::VentureCapital,
        address: "2865 Sand Hill Road, Menlo Park, CA 94025",
        aum_estimate: "35B+",
        investment_focus: "Technology, Crypto, Bio",
        stage_preference: "Seed to Growth",
        sectors: "AI/ML, Crypto, SaaS, Consumer, Bio",
        geography: "Global",
        website: "a16z.com",
        contact_email: Some("investments@a16z.com"),
        notable_investments: "Airbnb, Coinbase, Facebook, GitHub, Slack",
        decision_makers: "Marc Andreessen, Ben Horowitz",
    },
    SampleFirm {
        identifier: "0001234572",
        name: "Sequoia Capital",
        category: Category::VentureCapital,
        address: "2800 Sand Hill Road, Menlo Park, CA 94025",
        aum_estimate: "85B+",
        investment_focus: "Technology, Global Markets",
        stage_preference: "Seed to Late Stage",
        sectors: "Enterprise, Consumer, Healthcare, Fintech, Crypto",
        geography: "Global (US, China, India, Europe)",
        website: "sequoiacap.com",
        contact_email: Some("info@sequoiacap.com"),
        notable_investments: "Apple, Google, LinkedIn, Stripe, WhatsApp",
        decision_makers: "Roelof Botha, Doug Leone",
    },
    SampleFirm {
        identifier: "0001234573",
        name: "Benchmark Capital",
        category: Category::VentureCapital,
        address: "2965 Woodside Road, Woodside, CA 94062",
        aum_estimate: "10B+",
        investment_focus: "Early Stage Technology",
        stage_preference: "Seed, Series A",
        sectors: "Consumer, Enterprise Software, Mobile",
        geography: "United States",
        website: "benchmark.com",
        contact_email: Some("team@benchmark.com"),
        notable_investments: "eBay, Twitter, Uber, Snapchat, Discord",
        decision_makers: "Bill Gurley, Sarah Tavel",
    },
    SampleFirm {
        identifier: "0001234574",
        name: "Lightspeed Venture Partners",
        category: Category::VentureCapital,
        address: "2200 Sand Hill Road, Menlo Park, CA 94025",
        aum_estimate: "18B+",
        investment_focus: "Enterprise & Consumer Technology",
        stage_preference: "Seed to Growth",
        sectors: "Enterprise SaaS, Fintech, Consumer, Health, Music",
        geography: "Global (US, India, China, Europe)",
        website: "lsvp.com",
        contact_email: Some("info@lsvp.com"),
        notable_investments: "Snap, Affirm, Epic Games, Nutanix",
        decision_makers: "Jeremy Liew, Nicole Quinn",
    },
    SampleFirm {
        identifier: "0001234575",
        name: "KKR Private Equity",
        category: Category::PrivateEquity,
        address: "30 Hudson Yards, New York, NY 10001",
        aum_estimate: "500B+",
        investment_focus: "Buyouts, Infrastructure, Growth Equity",
        stage_preference: "Late Stage, Buyout",
        sectors: "Industrials, Media & Entertainment, Healthcare",
        geography: "Global",
        website: "kkr.com",
        contact_email: None,
        notable_investments: "First Data, Dollar General, BMG",
        decision_makers: "Joseph Bae, Scott Nuttall",
    },
    SampleFirm {
        identifier: "0001234576",
        name: "Bridgewater Associates Hedge",
        category: Category::HedgeFund,
        address: "1 Nyala Farms Road, Westport, CT 06880",
        aum_estimate: "120B+",
        investment_focus: "Global Macro, Systematic Strategies",
        stage_preference: "Public Markets",
        sectors: "Diversified, Machine Learning Research",
        geography: "Global",
        website: "bridgewater.com",
        contact_email: None,
        notable_investments: "Sovereign debt, global equities",
        decision_makers: "Nir Bar Dea (CEO)",
    },
    SampleFirm {
        identifier: "0001234577",
        name: "Vanguard Group Inc",
        category: Category::InstitutionalInvestor,
        address: "Valley Forge, PA",
        aum_estimate: "7T+",
        investment_focus: "Index Funds, ETFs",
        stage_preference: "Public Markets",
        sectors: "Diversified",
        geography: "Global",
        website: "vanguard.com",
        contact_email: None,
        notable_investments: "Major positions in all large cap tech",
        decision_makers: "Salim Ramji (CEO)",
    },
    SampleFirm {
        identifier: "0001234578",
        name: "BlackRock Inc",
        category: Category::InstitutionalInvestor,
        address: "New York, NY",
        aum_estimate: "9T+",
        investment_focus: "Asset Management, Index Funds",
        stage_preference: "Public Markets",
        sectors: "Diversified",
        geography: "Global",
        website: "blackrock.com",
        contact_email: None,
        notable_investments: "Major shareholder in most public companies",
        decision_makers: "Larry Fink (CEO)",
    },
];

/// Timestamp stamped on every sample record so the batch is reproducible
pub fn sample_retrieved_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Twelve firms covering every category archetype. Derived location and
/// focus fields are left for the normalizer.
pub fn generate_sample_batch() -> Vec<InvestorRecord> {
    let retrieved_at = sample_retrieved_at();
    SAMPLE_FIRMS
        .iter()
        .map(|firm| {
            let mut record = InvestorRecord::new(firm.name, retrieved_at);
            record.identifier = Some(firm.identifier.to_string());
            record.category = Some(firm.category);
            record.address = Some(firm.address.to_string());
            record.aum_estimate = Some(firm.aum_estimate.to_string());
            record.investment_focus = Some(firm.investment_focus.to_string());
            record.stage_preference = Some(firm.stage_preference.to_string());
            record.sectors = Some(firm.sectors.to_string());
            record.geography = Some(firm.geography.to_string());
            record.website = Some(firm.website.to_string());
            record.contact_email = firm.contact_email.map(str::to_string);
            record.notable_investments = Some(firm.notable_investments.to_string());
            record.decision_makers = Some(firm.decision_makers.to_string());
            record.source_url = Some(format!(
                "https://www.sec.gov/cgi-bin/browse-edgar?CIK={}",
                firm.identifier
            ));
            record
        })
        .collect()
}
