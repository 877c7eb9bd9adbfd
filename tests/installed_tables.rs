//! Installing external tables. Runs in its own process so that nothing has
//! touched the process-wide tables before.

use saju::tables::{self, Tables};
use saju::{BirthRecord, ChartConfig, SajuError, ZiHourRollover, calculate_four_pillars};

const LUNAR_1984: &str = "1984 1984-02-02 10  30 29 30 30 29 29 30 29 29 30 29 30 30\n";
const TERMS_1984: &str = "1984 01-06T12:41 01-21T06:05 02-05T00:19 02-19T20:16 \
    03-05T18:25 03-20T19:24 04-04T23:22 04-20T06:38 05-05T16:51 \
    05-21T05:58 06-05T21:09 06-21T14:02 07-07T07:29 07-23T00:58 \
    08-07T17:18 08-23T08:00 09-07T20:10 09-23T05:33 10-08T11:42 \
    10-23T14:46 11-07T14:45 11-22T12:11 12-07T07:28 12-22T01:23\n";

#[test]
fn install_then_freeze() {
    let installed = Tables::parse(LUNAR_1984, TERMS_1984)
        .unwrap()
        .install()
        .unwrap();
    assert!(std::ptr::eq(installed, tables::global()));
    assert_eq!(1984..=1984, tables::global().lunar_range());

    assert!(Tables::builtin().unwrap().install().is_err());
    assert_eq!(1984..=1984, tables::global().lunar_range());

    let config = ChartConfig::new(ZiHourRollover::SameDay);
    let chart = calculate_four_pillars(&BirthRecord::solar(1984, 6, 1, 12, 0), &config).unwrap();
    assert_eq!("甲子", chart.year.to_string());
    assert!(matches!(
        calculate_four_pillars(&BirthRecord::solar(2000, 1, 1, 12, 0), &config),
        Err(SajuError::UnsupportedEra { year: 2000, min: 1984, max: 1984 })
    ));
}
