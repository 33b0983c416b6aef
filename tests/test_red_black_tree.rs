use rand::Rng;
use redblack_collections::red_black_tree::RedBlackSet;
use redblack_collections::Error;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 10_000;

fn rng() -> rand::XorShiftRng {
    rand::SeedableRng::from_seed([1, 1, 1, 1])
}

#[test]
fn int_test_red_black_set() {
    let mut rng = rng();
    let mut set = RedBlackSet::with_chunk_size(64);
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 1_000u32);
        match rng.gen_range(0, 4) {
            0 | 1 => assert_eq!(set.insert(key), expected.insert(key)),
            2 => assert_eq!(set.remove(&key), expected.remove(&key)),
            _ => assert_eq!(set.take(&key), expected.take(&key)),
        }
        assert_eq!(set.len(), expected.len());
    }

    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
    assert!(set.iter().eq(expected.iter()));
    assert!(set.iter().rev().eq(expected.iter().rev()));
    assert!(set.into_iter().eq(expected.into_iter()));
}

#[test]
fn int_test_red_black_set_queries() {
    let mut rng = rng();
    let mut set = RedBlackSet::new();
    let mut expected = BTreeSet::new();
    for _ in 0..1_000 {
        let key = rng.gen_range(0, 10_000u32);
        set.insert(key);
        expected.insert(key);
    }

    for _ in 0..1_000 {
        let key = rng.gen_range(0, 10_500u32);
        assert_eq!(set.contains(&key), expected.contains(&key));
        assert_eq!(set.get(&key), expected.get(&key));
        assert_eq!(set.floor(&key), expected.range(..=key).next_back());
        assert_eq!(set.ceil(&key), expected.range(key..).next());
        assert_eq!(set.lower_bound(&key).key(), expected.range(key..).next());
        assert_eq!(
            set.upper_bound(&key).key(),
            expected.range(key + 1..).next(),
        );

        let end = key + rng.gen_range(0, 500u32);
        assert!(set.range(key..end).eq(expected.range(key..end)));
        assert!(set.range(key..=end).rev().eq(expected.range(key..=end).rev()));
    }

    for (rank, key) in expected.iter().enumerate() {
        assert_eq!(set.at(rank), Ok(key));
        assert_eq!(&set[rank], key);
    }
    assert_eq!(
        set.at(expected.len()),
        Err(Error::IndexOutOfRange {
            index: expected.len(),
            len: expected.len(),
        }),
    );
}

#[test]
fn int_test_red_black_set_cursors() {
    let mut rng = rng();
    let mut set = RedBlackSet::new();
    for _ in 0..2_000 {
        set.insert(rng.gen_range(0, 5_000u32));
    }
    let expected = set.iter().cloned().collect::<Vec<u32>>();

    let mut forward = Vec::new();
    let mut cursor = set.begin();
    while let Some(key) = cursor.key() {
        forward.push(*key);
        cursor.move_next();
    }
    assert_eq!(forward, expected);
    assert!(cursor == set.end());

    let mut reverse = Vec::new();
    let mut cursor = set.rbegin();
    while let Some(key) = cursor.key() {
        reverse.push(*key);
        cursor.move_next();
    }
    assert!(cursor == set.rend());
    reverse.reverse();
    assert_eq!(reverse, expected);

    let mut removed = Vec::new();
    {
        let mut cursor = set.begin_mut();
        while let Some(&key) = cursor.key() {
            if key % 3 == 0 {
                removed.push(cursor.remove_current());
            } else {
                cursor.move_next();
            }
        }
    }
    assert_eq!(
        removed,
        expected
            .iter()
            .filter(|key| *key % 3 == 0)
            .map(|key| Some(*key))
            .collect::<Vec<Option<u32>>>(),
    );
    assert!(set.iter().all(|key| key % 3 != 0));
}

#[test]
fn int_test_red_black_set_merge_split() {
    let mut rng = rng();
    let mut left = RedBlackSet::new();
    let mut right = RedBlackSet::new();
    let mut expected = BTreeSet::new();
    for _ in 0..1_000 {
        let key = rng.gen_range(0, 2_000u32);
        left.insert(key);
        expected.insert(key);
        right.insert(rng.gen_range(0, 2_000u32));
    }

    let original = left.clone();
    left += &right;
    let union = expected.union(&right.iter().cloned().collect()).cloned().collect::<BTreeSet<u32>>();
    assert!(left.iter().eq(union.iter()));

    left -= &right;
    let difference = expected
        .difference(&right.iter().cloned().collect())
        .cloned()
        .collect::<BTreeSet<u32>>();
    assert!(left.iter().eq(difference.iter()));

    assert!(original.iter().eq(expected.iter()));
}

#[test]
fn int_test_red_black_set_pop() {
    let mut rng = rng();
    let mut set = RedBlackSet::new();
    let mut expected = BTreeSet::new();
    for _ in 0..500 {
        let key = rng.next_u32();
        set.insert(key);
        expected.insert(key);
    }

    while !expected.is_empty() {
        if rng.gen::<bool>() {
            let min = *expected.iter().next().unwrap();
            expected.remove(&min);
            assert_eq!(set.pop_first(), Some(min));
        } else {
            let max = *expected.iter().next_back().unwrap();
            expected.remove(&max);
            assert_eq!(set.pop_last(), Some(max));
        }
    }
    assert!(set.is_empty());
    assert_eq!(set.pop_first(), None);
}
