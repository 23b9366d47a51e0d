use chrono::{TimeDelta, Utc};
use taistamp::{offset_at, Tai64, Tai64N};

fn main() {
    let now = Utc::now();
    let label = Tai64N::from_utc(now);
    let later = label.wrapping_add(TimeDelta::milliseconds(1_500));

    println!("UTC:        {now}");
    println!("Leap offset {} s", offset_at(now));
    println!("TAI64:      {}", Tai64::from(label));
    println!("TAI64N:     {label}");
    println!("+1.5 s:     {later}");
    match later.wrapping_sub(label) {
        Ok(elapsed) => println!("elapsed:    {elapsed}"),
        Err(err) => println!("elapsed:    {err}"),
    }
}
