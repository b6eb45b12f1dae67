// Table question answering: CSV retrieval and extractive answers.

pub mod answer;
pub mod retriever;
