use passbook_core::{ColumnRole, ImportantKeywords, NormalizedTransaction};
use passbook_normalize::{DetectedLayout, detect_important_kind};

pub fn print_transactions(txns: &[&NormalizedTransaction], keywords: &ImportantKeywords, max_rows: usize) {
    let limit = if max_rows == 0 { txns.len() } else { max_rows };

    for t in txns.iter().take(limit) {
        let flag = detect_important_kind(&t.memo, keywords)
            .map(|k| format!(" [{}]", k.label()))
            .unwrap_or_default();
        println!(
            "{} | {} | {:>15.0} | {:>15.0} | {}{}",
            t.transaction_date,
            t.kind.label(),
            t.amount,
            t.balance,
            t.memo,
            flag
        );
    }

    if txns.len() > limit {
        println!("... {} more", txns.len() - limit);
    }
}

pub fn print_summary(s: &passbook_normalize::StatementSummary) {
    println!("Transactions: {} (입금 {}, 출금 {})", s.transaction_count, s.deposit_count, s.withdrawal_count);
    println!("Deposits:     {:.0}", s.total_deposits);
    println!("Withdrawals:  {:.0}", s.total_withdrawals);
    println!("Net:          {:.0}", s.net);
    if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
        println!("Period:       {} ~ {}", first, last);
    }
    if let Some(balance) = s.closing_balance {
        println!("Closing:      {:.0}", balance);
    }
    for (kind, count) in &s.important {
        println!("Important:    {} x{}", kind.label(), count);
    }
}

pub fn print_layout(layout: &DetectedLayout) {
    for role in ColumnRole::ALL {
        let column = layout.mapping.get(role).unwrap_or("-");
        println!("{:<8} {}", role.label(), column);
    }
    println!("{:<8} {}", "비고", layout.memo_column.as_deref().unwrap_or("-"));

    let missing = layout.mapping.missing_required();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|r| r.label()).collect();
        println!("\nMissing required columns: {}", names.join(", "));
    }
    if !layout.mapping.has_amount_columns() {
        println!("No amount columns detected; every row will resolve to 0.");
    }
}
