//! Fixtures shared by the unit tests.

use std::sync::Arc;

use crate::chromosome::{IntegerBounds, IntegerChromosome, TupleChromosome};
use crate::evolution::challenge::{Challenge, SharedChallenge};
use crate::organism::{Genotype, Organism, OrganismKind};
use crate::rng::RandomNumberGenerator;

/// Fitness is the value of the `value` chromosome.
pub struct ValueChallenge;

impl Challenge<i64> for ValueChallenge {}

pub fn challenge() -> SharedChallenge<i64> {
    Arc::new(ValueChallenge)
}

/// Organisms holding one integer chromosome, ordered by age (younger wins).
pub fn kind() -> Arc<OrganismKind<i64>> {
    OrganismKind::builder("value")
        .chromosome("value", |rng| {
            Ok(IntegerChromosome::new(rng.integer(0, 100), IntegerBounds::default()))
        })
        .decoder::<ValueChallenge, _>(|organism| {
            Ok(organism.chromosome::<IntegerChromosome>("value")?.allele())
        })
        .ordering(|a, b| b.age().cmp(&a.age()))
        .build()
        .unwrap()
}

pub fn organism(kind: &Arc<OrganismKind<i64>>, value: i64) -> Arc<Organism<i64>> {
    aged(kind, value, 1)
}

pub fn aged(kind: &Arc<OrganismKind<i64>>, value: i64, age: u64) -> Arc<Organism<i64>> {
    let mut genotype = Genotype::new();
    genotype.insert(
        "value".to_string(),
        Box::new(IntegerChromosome::new(value, IntegerBounds::default())),
    );
    Arc::new(Organism::with_genotype(kind, genotype).unwrap().with_age(age))
}

pub fn organisms(kind: &Arc<OrganismKind<i64>>, values: &[i64]) -> Vec<Arc<Organism<i64>>> {
    values.iter().map(|&value| organism(kind, value)).collect()
}

pub fn values(organisms: &[Arc<Organism<i64>>]) -> Vec<i64> {
    organisms
        .iter()
        .map(|organism| organism.decode(&ValueChallenge).unwrap())
        .collect()
}

/// Organisms holding a crossable tuple of four digits. Fitness is their sum.
pub fn tuple_kind() -> Arc<OrganismKind<i64>> {
    OrganismKind::builder("digits")
        .chromosome("digits", |rng| {
            Ok(TupleChromosome::new(
                (0..4).map(|_| rng.integer(0, 9)).collect::<Vec<i64>>(),
            ))
        })
        .decoder::<ValueChallenge, _>(|organism| {
            Ok(organism
                .chromosome::<TupleChromosome<i64>>("digits")?
                .alleles()
                .iter()
                .sum())
        })
        .build()
        .unwrap()
}

pub fn random_organisms(
    kind: &Arc<OrganismKind<i64>>,
    count: usize,
    rng: &mut RandomNumberGenerator,
) -> Vec<Arc<Organism<i64>>> {
    (0..count)
        .map(|_| Arc::new(Organism::new(kind, rng).unwrap()))
        .collect()
}
