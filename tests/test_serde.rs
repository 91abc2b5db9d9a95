#![cfg(feature = "serde")]

use genetics::chromosome::{
    BitStringChromosome, BitStringMutation, FloatBounds, FloatChromosome, FloatMutation,
    IntegerBounds, IntegerChromosome, PermutationChromosome, PermutationCrossover,
    SequenceMutation,
};
use genetics::selection::{LinearRanking, TournamentSelector};

#[test]
fn test_permutation_keeps_its_operators() {
    let chromosome = PermutationChromosome::new(vec![3u8, 0, 2, 1])
        .unwrap()
        .with_mutation(SequenceMutation::Invert)
        .with_crossover(PermutationCrossover::Edge);

    let json = serde_json::to_string(&chromosome).unwrap();
    assert!(json.contains("Invert"));
    assert!(json.contains("Edge"));

    let restored: PermutationChromosome<u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.alleles(), chromosome.alleles());
}

#[test]
fn test_scalar_chromosomes() {
    let float = FloatChromosome::new(0.25, FloatBounds::new(0.0, 0.5, -1.0, 1.0).unwrap())
        .with_mutation(FloatMutation::NonUniform);
    let restored: FloatChromosome =
        serde_json::from_str(&serde_json::to_string(&float).unwrap()).unwrap();
    assert_eq!(restored, float);

    let integer = IntegerChromosome::new(7, IntegerBounds::new(-2, 2).unwrap());
    let restored: IntegerChromosome =
        serde_json::from_str(&serde_json::to_string(&integer).unwrap()).unwrap();
    assert_eq!(restored, integer);
    assert_eq!(restored.bounds(), &IntegerBounds::new(-2, 2).unwrap());
}

#[test]
fn test_bitstring_from_json() {
    let json = r#"{"bits":[true,false,true],"mutation":"Flip","crossover":"Uniform"}"#;
    let bits: BitStringChromosome = serde_json::from_str(json).unwrap();
    assert_eq!(bits.count_ones(), 2);

    let json = serde_json::to_string(&BitStringMutation::Sequence(SequenceMutation::Swap)).unwrap();
    assert_eq!(json, r#"{"Sequence":"Swap"}"#);
}

#[test]
fn test_selector_parameters() {
    let tournament = TournamentSelector::new(5).unwrap();
    let restored: TournamentSelector =
        serde_json::from_str(&serde_json::to_string(&tournament).unwrap()).unwrap();
    assert_eq!(restored.size(), 5);

    let ranking = LinearRanking::new(1.2).unwrap();
    let restored: LinearRanking =
        serde_json::from_str(&serde_json::to_string(&ranking).unwrap()).unwrap();
    assert_eq!(restored, ranking);
}
