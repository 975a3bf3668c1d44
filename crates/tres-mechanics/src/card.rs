//! Chat cards for challenges and attacks.

use crate::attack::AttackReport;
use crate::challenge::ChallengeResult;

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// The card posted after a challenge.
pub fn challenge_card(actor_name: &str, stat_key: &str, result: &ChallengeResult) -> String {
    let m = &result.modifiers;
    format!(
        "<b>{actor}</b> &mdash; <i>{stat} Challenge</i><br>\n\
         <b>Boons:</b> {boons} &nbsp; <b>Banes:</b> {banes} &nbsp; <b>Modifier:</b> {modifier}<br>\n\
         <b>Net dice:</b> {net} &nbsp; <b>Formula:</b> {formula}<br>\n\
         <b>Total:</b> {total}",
        actor = escape_html(actor_name),
        stat = escape_html(&stat_key.to_uppercase()),
        boons = m.boons,
        banes = m.banes,
        modifier = escape_html(&m.modifier_text),
        net = result.net_dice,
        formula = result.formula,
        total = result.total,
    )
}

/// The card posted after an attack.
pub fn attack_card(report: &AttackReport) -> String {
    let verdict = if report.hit { "HIT" } else { "MISS" };
    let damage_line = report.damage.as_ref().map_or_else(String::new, |d| {
        let wound = d
            .wound
            .map_or_else(String::new, |w| format!(" &rarr; {w}"));
        format!(
            "\n<p>Damage: {} = <b>{}</b> vs Armor {}{wound}</p>",
            escape_html(&d.formula),
            d.roll.total,
            d.armor
        )
    });
    format!(
        "<div class=\"tres-card\"><h3>Attack: {weapon}</h3>\n\
         <p>Attack: {formula} = <b>{total}</b> vs Evade {evade} &rarr; {verdict}</p>{damage_line}</div>",
        weapon = escape_html(&report.weapon),
        formula = escape_html(&report.attack.formula),
        total = report.attack.total,
        evade = report.evade,
    )
}
