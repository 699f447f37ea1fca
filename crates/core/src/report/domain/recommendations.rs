use crate::judgment::domain::verdict::Verdict;

use super::document::Rgb;

const HIRE_RECOMMENDATIONS: &[&str] = &[
    "[+] STRONG HIRE - Excellent communication and skill match",
    "[+] Proceed to technical assessment immediately",
    "[+] Prepare compensation offer package",
    "[+] Schedule background verification",
    "[+] Plan 30-60-90 day onboarding",
];

const REJECT_RECOMMENDATIONS: &[&str] = &[
    "[x] NOT RECOMMENDED at this time",
    "[x] Send professional rejection with feedback",
    "[*] Suggest: English training and reapply in 6 months",
    "[*] Keep in talent pool for future opportunities",
    "[*] Provide resources for improvement",
];

const REVIEW_RECOMMENDATIONS: &[&str] = &[
    "[*] CONDITIONAL - Requires further evaluation",
    "[*] Technical assessment recommended",
    "[*] Schedule focused follow-up interview",
    "[*] Request portfolio/project examples",
    "[*] Final decision after 2nd round",
];

const HIRE_NEXT_STEPS: &[&str] = &[
    "1. Contact candidate with positive feedback",
    "2. Schedule technical assessment interview",
    "3. Prepare offer letter with benefits package",
    "4. Conduct background and reference check",
    "5. Send official offer and set start date",
];

const REJECT_NEXT_STEPS: &[&str] = &[
    "1. Send professional rejection email",
    "2. Provide constructive feedback",
    "3. Recommend language/skill training",
    "4. Keep contact for future roles",
    "5. Schedule 6-month follow-up",
];

const REVIEW_NEXT_STEPS: &[&str] = &[
    "1. Share interim feedback with the candidate",
    "2. Schedule a focused follow-up interview",
    "3. Request portfolio or project samples",
    "4. Probe the CV skills that were not discussed",
    "5. Make the final decision after the second round",
];

pub fn recommendations(verdict: Verdict) -> &'static [&'static str] {
    match verdict {
        Verdict::Hire => HIRE_RECOMMENDATIONS,
        Verdict::Reject => REJECT_RECOMMENDATIONS,
        Verdict::Review => REVIEW_RECOMMENDATIONS,
    }
}

pub fn next_steps(verdict: Verdict) -> &'static [&'static str] {
    match verdict {
        Verdict::Hire => HIRE_NEXT_STEPS,
        Verdict::Reject => REJECT_NEXT_STEPS,
        Verdict::Review => REVIEW_NEXT_STEPS,
    }
}

pub fn banner_color(verdict: Verdict) -> Rgb {
    match verdict {
        Verdict::Hire => Rgb::GREEN,
        Verdict::Reject => Rgb::RED,
        Verdict::Review => Rgb::AMBER,
    }
}

pub fn banner_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Hire => "VERDICT: HIRE",
        Verdict::Reject => "VERDICT: REJECT",
        Verdict::Review => "VERDICT: FURTHER REVIEW",
    }
}
