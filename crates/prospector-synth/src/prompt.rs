//! Deterministic prompt construction for single analyses and batch emails.

use prospector_core::{
    AggregatedData, BatchEntity, CompanyProfile, OutreachSegment, UNKNOWN_TECH_STACK,
};

pub const NO_NEWS_PLACEHOLDER: &str = "No recent news available";
pub const NO_SEARCH_PLACEHOLDER: &str = "Limited search data";

const ANALYST_SYSTEM_PROMPT: &str = "\
You are an expert SDR intelligence analyst specializing in the logistics and trucking industry.
You analyze companies through the lens of AI-powered call automation solutions like HappyRobot.
Your goal is to surface operational pain points and craft compelling outreach angles.

Focus on:
- Driver communication challenges (coordination, compliance, safety)
- Dispatch and routing inefficiencies
- Customer communication friction
- Compliance and safety tracking burdens
- Lack of automation in operations";

const EMAIL_SYSTEM_PROMPT: &str = "\
You are an expert SDR email writer specializing in the logistics and trucking industry.
Generate personalized cold outreach emails for multiple prospects.
Each email should:
- Be 100-150 words
- Reference specific pain points from the company analysis
- Include a clear HappyRobot value proposition
- Be professional and ready to send
- Have a natural signature line

Format your response as:
[COMPANY_NAME_1]
[Email body here]

[COMPANY_NAME_2]
[Email body here]

etc.";

/// A system/user prompt pair for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the analysis prompt for one company.
///
/// `hint` is the catalog entry for the company, when known; it adds a
/// one-line fact sheet and steers the suggested decision-maker titles.
#[must_use]
pub fn build_single_prompt(data: &AggregatedData, hint: Option<&CompanyProfile>) -> PromptPair {
    let news = if data.news.is_empty() {
        NO_NEWS_PLACEHOLDER.to_string()
    } else {
        data.news
            .iter()
            .map(|n| format!("- {}", n.title))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let search = if data.search_results.is_empty() {
        NO_SEARCH_PLACEHOLDER.to_string()
    } else {
        data.search_results
            .iter()
            .map(|r| format!("- {}: {}", r.title, r.snippet))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let known_facts = hint
        .map(|profile| format!("Known Facts: {}\n", fact_sheet(profile)))
        .unwrap_or_default();
    let user = format!(
        "Analyze this trucking/logistics company and provide intelligence for an SDR \
         pitching AI-powered call automation:\n\n\
         Company: {company}\n{known_facts}\
         \nRecent News:\n{news}\n\nSearch Results:\n{search}\n\n\
         Provide a JSON response with exactly these fields:\n{template}",
        company = data.company_name,
        template = json_template(segment_of(hint))
    );

    PromptPair {
        system: ANALYST_SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// Build the single prompt that asks for one email per entity.
///
/// Entities are numbered from 1 in input order. Callers validate entities
/// first; an entity without an analysis renders with empty fields.
#[must_use]
pub fn build_batch_prompt(entities: &[BatchEntity]) -> PromptPair {
    let companies = entities
        .iter()
        .enumerate()
        .map(|(idx, entity)| render_entity(idx + 1, entity))
        .collect::<Vec<_>>()
        .join("\n---\n");

    let user = format!(
        "Generate personalized cold outreach emails for these prospects:\n\n{companies}\n\n\
         Remember: Each email should be unique, specific to the company's pain points, \
         and compelling."
    );

    PromptPair {
        system: EMAIL_SYSTEM_PROMPT.to_string(),
        user,
    }
}

fn render_entity(position: usize, entity: &BatchEntity) -> String {
    let (profile, pain_points, tech_stack, outreach_angle) = match &entity.analysis {
        Some(a) => (
            a.profile.as_str(),
            a.pain_points.join(", "),
            a.tech_stack.as_str(),
            a.outreach_angle.as_str(),
        ),
        None => ("", String::new(), "", ""),
    };

    format!(
        "\nCompany {position}: {name}\nProfile: {profile}\nPain Points: {pain_points}\n\
         Tech Stack: {tech_stack}\nOutreach Angle: {outreach_angle}\n",
        name = entity.company_name
    )
}

fn segment_of(hint: Option<&CompanyProfile>) -> OutreachSegment {
    hint.map_or(OutreachSegment::General, CompanyProfile::outreach_segment)
}

fn fact_sheet(profile: &CompanyProfile) -> String {
    let mut facts = format!(
        "{} with a fleet of roughly {} trucks",
        profile.company_type, profile.fleet_size
    );
    if let Some(hq) = profile.headquarters.as_deref() {
        facts.push_str(", headquartered in ");
        facts.push_str(hq);
    }
    facts
}

/// Suggested buyer titles for each outreach segment.
fn decision_maker_titles(segment: OutreachSegment) -> &'static [&'static str] {
    match segment {
        OutreachSegment::LargeCarrier => {
            &["VP of Operations", "Director of Fleet Safety", "CTO"]
        }
        OutreachSegment::OwnerOperatorNetwork => &[
            "Network Operations Director",
            "Driver Relations Manager",
            "Owner",
        ],
        OutreachSegment::SpecialtyCarrier => {
            &["Director of Safety & Compliance", "Dispatch Manager"]
        }
        OutreachSegment::General => &["Operations Manager", "Fleet Manager"],
    }
}

fn json_template(segment: OutreachSegment) -> String {
    let titles = decision_maker_titles(segment).join(", ");
    format!(
        "{{\n  \"profile\": \"2-3 sentence company overview including size, location, specialty, and business model\",\n  \
         \"painPoints\": [\"Pain point 1\", \"Pain point 2\", \"Pain point 3\"],\n  \
         \"techStack\": \"1-2 sentence assessment of visible technology/infrastructure. If unknown, say '{UNKNOWN_TECH_STACK}'\",\n  \
         \"outreachAngle\": \"Specific 1-2 sentence cold call pitch for HappyRobot that addresses their pain points\",\n  \
         \"decisionMakers\": [{{\"title\": \"Role to contact (suggested: {titles})\", \"concerns\": [\"What this role cares about\"]}}]\n}}"
    )
}
