#![no_main]
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use treffpunkt::time::{Available, Intersect, TimeMerge, TimeRange};

/// Every instant covered by `ranges`
fn instants(ranges: &[TimeRange<u8>]) -> HashSet<u8> {
    ranges.iter().flat_map(|r| r.start()..r.end()).collect()
}

fuzz_target!(|data: (Vec<TimeRange<u8>>, Vec<TimeRange<u8>>)| {
    let a = data.0.iter().time_merge();
    let b = data.1.iter().time_merge();

    assert!(
        a.windows(2).all(|pair| pair[0].end() < pair[1].start()),
        "Merged ranges must be sorted, disjoint and not touching: {:?}",
        a
    );
    assert_eq!(instants(&a), instants(&data.0), "Merging changed coverage");

    let common = a.iter().intersect(&b);
    assert_eq!(common, b.iter().intersect(&a), "Intersection must commute");
    assert!(common.iter().all(|r| !r.is_empty()), "Empty range in {:?}", common);

    let expected: HashSet<u8> = instants(&a).intersection(&instants(&b)).copied().collect();
    assert_eq!(instants(&common), expected, "Intersection lost or invented instants");

    let available = b.iter().get_availability(&a);
    let expected: HashSet<u8> = instants(&a).difference(&instants(&b)).copied().collect();
    assert_eq!(instants(&available), expected, "Availability is not `a - b`");
});
