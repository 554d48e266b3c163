mod fixture;
mod policy_test;
