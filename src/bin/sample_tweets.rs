use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tweet_sampler::apps::run_sample_tweets(std::env::args().skip(1))
}
