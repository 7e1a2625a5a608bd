//! Plain-text views of the wallet.

use climadelv_contracts::{action::ActionRecord, wallet::Summary};

pub fn print_summary(summary: &Summary) {
    println!("Your Climate Impact Summary");
    println!("  Total Actions:   {}", summary.action_count);
    println!("  Total CO2 Saved: {} kg", summary.total_co2);
    println!("  Total Credits:   {}", summary.total_credits);
}

pub fn print_history(records: &[&ActionRecord]) {
    if records.is_empty() {
        println!("No actions logged yet.");
        return;
    }

    println!("Action History");
    for record in records {
        println!("---");
        println!("  Date:            {}", record.date);
        println!("  Activity:        {}", record.activity);
        println!("  Location:        {}", record.location);
        println!("  People Involved: {}", record.participants);
        println!("  Trees:           {}", record.trees);
        println!("  CO2 Saved:       {} kg", record.co2_saved);
        println!("  Credits Earned:  {}", record.credits);
        println!("  Tip:             {}", record.tip);
    }
}
