use crate::model::Example;
use crate::store::traits::ExampleStore;
use anyhow::Result;

/// Built-in prompt/response pairs for a fresh annotation session
pub fn sample_examples() -> Vec<Example> {
    vec![
        Example::new(
            "1",
            "What is the capital of France?",
            "Paris is the capital of France. It is located in the north-central part of the \
             country and is known for its rich history, culture, and landmarks like the Eiffel \
             Tower.",
        ),
        Example::new(
            "2",
            "Explain quantum computing in simple terms.",
            "Quantum computing uses quantum bits (qubits) instead of regular bits. While regular \
             bits can only be 0 or 1, qubits can be both at the same time through a property \
             called superposition. This allows quantum computers to process many possibilities \
             simultaneously, making them potentially much faster for certain types of problems.",
        ),
        Example::new(
            "3",
            "How do you make a paper airplane?",
            "To make a basic paper airplane: 1) Take a sheet of paper and fold it in half \
             lengthwise, then unfold. 2) Fold the top corners into the center crease to form a \
             triangle. 3) Fold the slanted edges into the center crease again. 4) Fold the plane \
             in half along the original center crease. 5) Create wings by folding each side down \
             to align with the bottom of the plane.",
        ),
        Example::new(
            "4",
            "What are the benefits of renewable energy?",
            "Renewable energy offers several benefits: environmental (reduces greenhouse gas \
             emissions and pollution), economic (creates jobs and reduces energy costs over \
             time), energy security (reduces dependence on fossil fuel imports), and \
             sustainability (sources like solar and wind are inexhaustible). It also helps \
             combat climate change and provides more stable energy prices.",
        ),
        Example::new(
            "5",
            "Describe the water cycle.",
            "The water cycle is the continuous movement of water through Earth's systems. It \
             includes: evaporation (water turns to vapor from oceans/lakes), condensation (vapor \
             forms clouds), precipitation (rain/snow falls), and collection (water returns to \
             bodies of water). This cycle is powered by the sun and gravity, constantly \
             recycling Earth's water supply.",
        ),
    ]
}

/// Replace the stored examples with the sample set. Returns how many were written.
pub async fn load_seed_data<S: ExampleStore + ?Sized>(store: &S) -> Result<usize> {
    let examples = sample_examples();
    let count = examples.len();
    store.replace_examples(examples).await?;
    Ok(count)
}
